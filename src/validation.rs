//! Validators for the parameters every Egeria operation shares.
//!
//! All checks are local and pure: they run before any request is built and
//! report the offending parameter through an [`EgeriaError::InvalidParameter`].

use crate::error::{CallSite, EgeriaError, ExceptionDetail, Result};
use crate::error_code::ErrorCode;
use url::Url;

/// Largest page size accepted unless the configuration says otherwise
pub const DEFAULT_MAX_PAGE_SIZE: i32 = 100;

/// Check that `url` is a non-empty absolute http(s) URL with a host.
///
/// Whitespace anywhere in the value is malformed; the URL parser would
/// otherwise trim or percent-encode it silently.
///
/// Returns the parsed URL so callers can build on it.
pub fn validate_url(url: &str, site: &CallSite) -> Result<Url> {
    if url.trim().is_empty() {
        return Err(EgeriaError::InvalidParameter(Box::new(
            ExceptionDetail::new::<&str>(ErrorCode::ServerUrlNotSpecified, site, &[])
                .with_params(vec![url.to_string()]),
        )));
    }

    let malformed = || {
        EgeriaError::InvalidParameter(Box::new(
            ExceptionDetail::new(ErrorCode::ServerUrlMalformed, site, &[url])
                .with_params(vec![url.to_string()]),
        ))
    };

    if url.chars().any(|c| c.is_ascii_whitespace()) {
        return Err(malformed());
    }

    let parsed = Url::parse(url).map_err(|_| malformed())?;
    let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
    if !matches!(parsed.scheme(), "http" | "https") || !has_host {
        return Err(malformed());
    }

    Ok(parsed)
}

pub fn validate_server_name(server_name: &str, site: &CallSite) -> Result<()> {
    if server_name.trim().is_empty() {
        return Err(EgeriaError::invalid_parameter::<&str>(
            ErrorCode::ServerNameNotSpecified,
            site,
            &[],
        ));
    }
    Ok(())
}

pub fn validate_user_id(user_id: &str, site: &CallSite) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(EgeriaError::invalid_parameter(
            ErrorCode::NullUserId,
            site,
            &[site.method_name],
        ));
    }
    Ok(())
}

pub fn validate_guid(guid: &str, parameter: &str, site: &CallSite) -> Result<()> {
    require_value(guid, ErrorCode::NullGuid, parameter, site)
}

pub fn validate_name(name: &str, parameter: &str, site: &CallSite) -> Result<()> {
    require_value(name, ErrorCode::NullName, parameter, site)
}

pub fn validate_search_string(search_string: &str, parameter: &str, site: &CallSite) -> Result<()> {
    require_value(search_string, ErrorCode::NullSearchString, parameter, site)
}

pub fn validate_text(text: &str, parameter: &str, site: &CallSite) -> Result<()> {
    require_value(text, ErrorCode::NullText, parameter, site)
}

pub fn validate_array<T>(values: &[T], parameter: &str, site: &CallSite) -> Result<()> {
    if values.is_empty() {
        return Err(EgeriaError::invalid_parameter(
            ErrorCode::NullArrayParameter,
            site,
            &[parameter, site.method_name],
        ));
    }
    Ok(())
}

/// Validate a `start_from`/`page_size` pair.
///
/// A page size of zero asks the server for its default page size.
pub fn validate_paging(start_from: i32, page_size: i32, max_page_size: i32, site: &CallSite) -> Result<()> {
    let start = start_from.to_string();
    let size = page_size.to_string();

    if start_from < 0 {
        return Err(paging_error(
            ErrorCode::NegativeStartFrom,
            site,
            &[start.as_str(), "start_from", site.method_name],
        ));
    }

    if page_size < 0 {
        return Err(paging_error(
            ErrorCode::NegativePageSize,
            site,
            &[size.as_str(), "page_size", site.method_name],
        ));
    }

    if page_size > max_page_size {
        let max = max_page_size.to_string();
        return Err(paging_error(
            ErrorCode::MaxPageSize,
            site,
            &[size.as_str(), "page_size", site.method_name, max.as_str()],
        ));
    }

    Ok(())
}

fn paging_error(code: ErrorCode, site: &CallSite, args: &[&str]) -> EgeriaError {
    let offending = args.first().map(|v| v.to_string()).into_iter().collect();
    EgeriaError::InvalidParameter(Box::new(ExceptionDetail::new(code, site, args).with_params(offending)))
}

fn require_value(value: &str, code: ErrorCode, parameter: &str, site: &CallSite) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EgeriaError::InvalidParameter(Box::new(
            ExceptionDetail::new(code, site, &[parameter, site.method_name])
                .with_params(vec![parameter.to_string()]),
        )));
    }
    Ok(())
}
