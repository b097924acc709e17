use crate::error::ApiError;

const DEFAULT_OFFSET: i64 = 0;
const DEFAULT_LIMIT: i64 = 10;

/// Parse `offset` and `limit` from a raw query string.
///
/// Each parameter may appear at most once and must parse as an integer;
/// anything else is a request-validation failure, never a silent fall back
/// to the defaults. Unknown parameters are ignored.
pub(crate) fn parse_pagination(query: Option<&str>) -> Result<(i64, i64), ApiError> {
    let mut offset = None;
    let mut limit = None;

    let Some(query) = query else {
        return Ok((DEFAULT_OFFSET, DEFAULT_LIMIT));
    };

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));

        let slot = match name {
            "offset" => &mut offset,
            "limit" => &mut limit,
            _ => continue,
        };

        if slot.is_some() {
            return Err(ApiError::InvalidQueryParams);
        }
        *slot = Some(
            value
                .parse::<i64>()
                .map_err(|_| ApiError::InvalidQueryParams)?,
        );
    }

    Ok((
        offset.unwrap_or(DEFAULT_OFFSET),
        limit.unwrap_or(DEFAULT_LIMIT),
    ))
}
