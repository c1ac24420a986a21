use clap::Parser;
use timescale_cli::{Cli, report_error, run};
use timescale_types::CancellationToken;

fn main() {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping to `head` or `less` that exits early)
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();
    let format = cli.format;
    let cancel = CancellationToken::new();

    if let Err(e) = run(cli, &cancel) {
        std::process::exit(report_error(&e, format));
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
