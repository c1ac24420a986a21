use timescale_index::Database;
use timescale_types::{
    FileSummary, MAX_PAGE_SIZE, Page, PageRequest, RangeFilter, ResultsQuery, SummaryFilter,
};
use tracing::debug;

use crate::{Error, Result};

/// Check raw listing parameters and turn them into a filter plus a page.
///
/// Rules are checked in a fixed order and the first violation is reported.
/// Nothing here touches storage.
pub fn validate_results_query(
    query: &ResultsQuery,
    default_page_size: u32,
) -> Result<(SummaryFilter, PageRequest)> {
    let min_date = RangeFilter::new(query.min_date_from, query.min_date_to);
    if min_date.is_reversed() {
        return Err(invalid("minDateFrom must be <= minDateTo."));
    }

    let avg_value = RangeFilter::new(query.avg_value_min, query.avg_value_max);
    if avg_value.is_reversed() {
        return Err(invalid("avgValueMin must be <= avgValueMax."));
    }

    let avg_execution_time =
        RangeFilter::new(query.avg_execution_time_min, query.avg_execution_time_max);
    if avg_execution_time.is_reversed() {
        return Err(invalid("avgExecutionTimeMin must be <= avgExecutionTimeMax."));
    }

    let page = match query.page {
        None => 1,
        Some(page) if page >= 1 => u32::try_from(page).map_err(|_| invalid("page is too large."))?,
        Some(_) => return Err(invalid("page must be >= 1.")),
    };

    let page_size = match query.page_size {
        None => default_page_size,
        Some(size) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&size) => size as u32,
        Some(_) => {
            return Err(invalid(&format!(
                "pageSize must be between 1 and {}.",
                MAX_PAGE_SIZE
            )));
        }
    };

    // A blank needle means no filter; anything else is matched verbatim
    let file_name = query
        .file_name
        .as_ref()
        .filter(|name| !name.trim().is_empty())
        .cloned();

    let filter = SummaryFilter {
        file_name,
        min_date,
        avg_value,
        avg_execution_time,
    };

    Ok((filter, PageRequest { page, page_size }))
}

/// Validated, filtered and paginated listing of stored summaries.
pub fn results(
    db: &Database,
    query: &ResultsQuery,
    default_page_size: u32,
) -> Result<Page<FileSummary>> {
    let (filter, page) = validate_results_query(query, default_page_size)?;
    debug!(?filter, page = page.page, page_size = page.page_size, "listing summaries");

    let listing = db.list_summaries(&filter, &page)?;
    debug!(
        total = listing.total,
        returned = listing.items.len(),
        "summaries listed"
    );

    Ok(listing)
}

fn invalid(msg: &str) -> Error {
    Error::InvalidRequest(msg.to_string())
}
