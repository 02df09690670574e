//! Closed catalogue of Egeria client error codes.
//!
//! Every failure the client can report maps to exactly one [`ErrorCode`],
//! and every code owns one immutable [`ErrorRecord`]. The lookup is an
//! exhaustive `match`, so a new code cannot be added without its record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable description of one failure condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRecord {
    /// HTTP-style status reported for this condition
    pub http_error_code: u16,
    /// Stable, machine-matchable identifier
    pub message_id: &'static str,
    /// Message text with positional `{0}`, `{1}`, ... placeholders
    pub message_template: &'static str,
    /// What the client did when the condition was detected
    pub system_action: &'static str,
    /// What the operator should do about it
    pub user_action: &'static str,
}

impl ErrorRecord {
    /// Substitute positional placeholders in the message template.
    ///
    /// Placeholders without a matching argument are left untouched.
    pub fn format_message<S: AsRef<str>>(&self, args: &[S]) -> String {
        format_template(self.message_template, args)
    }
}

/// Machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // -- Invalid parameters detected locally --
    ServerUrlNotSpecified,
    ServerUrlMalformed,
    ServerNameNotSpecified,
    NullUserId,
    NullGuid,
    NullName,
    NullArrayParameter,
    NegativeStartFrom,
    NegativePageSize,
    MaxPageSize,
    NullEnum,
    NullText,
    NullObject,
    NullSearchString,

    // -- REST connector --
    ClientSideRestApiError,
    ExceptionResponseFromApi,
    UnexpectedResponse,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 17] = [
        Self::ServerUrlNotSpecified,
        Self::ServerUrlMalformed,
        Self::ServerNameNotSpecified,
        Self::NullUserId,
        Self::NullGuid,
        Self::NullName,
        Self::NullArrayParameter,
        Self::NegativeStartFrom,
        Self::NegativePageSize,
        Self::MaxPageSize,
        Self::NullEnum,
        Self::NullText,
        Self::NullObject,
        Self::NullSearchString,
        Self::ClientSideRestApiError,
        Self::ExceptionResponseFromApi,
        Self::UnexpectedResponse,
    ];

    /// Stable symbolic name (e.g. `"SERVER_URL_MALFORMED"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerUrlNotSpecified => "SERVER_URL_NOT_SPECIFIED",
            Self::ServerUrlMalformed => "SERVER_URL_MALFORMED",
            Self::ServerNameNotSpecified => "SERVER_NAME_NOT_SPECIFIED",
            Self::NullUserId => "NULL_USER_ID",
            Self::NullGuid => "NULL_GUID",
            Self::NullName => "NULL_NAME",
            Self::NullArrayParameter => "NULL_ARRAY_PARAMETER",
            Self::NegativeStartFrom => "NEGATIVE_START_FROM",
            Self::NegativePageSize => "NEGATIVE_PAGE_SIZE",
            Self::MaxPageSize => "MAX_PAGE_SIZE",
            Self::NullEnum => "NULL_ENUM",
            Self::NullText => "NULL_TEXT",
            Self::NullObject => "NULL_OBJECT",
            Self::NullSearchString => "NULL_SEARCH_STRING",
            Self::ClientSideRestApiError => "CLIENT_SIDE_REST_API_ERROR",
            Self::ExceptionResponseFromApi => "EXCEPTION_RESPONSE_FROM_API",
            Self::UnexpectedResponse => "UNEXPECTED_RESPONSE",
        }
    }

    /// The immutable record describing this code.
    pub fn record(&self) -> &'static ErrorRecord {
        match self {
            Self::ServerUrlNotSpecified => &SERVER_URL_NOT_SPECIFIED,
            Self::ServerUrlMalformed => &SERVER_URL_MALFORMED,
            Self::ServerNameNotSpecified => &SERVER_NAME_NOT_SPECIFIED,
            Self::NullUserId => &NULL_USER_ID,
            Self::NullGuid => &NULL_GUID,
            Self::NullName => &NULL_NAME,
            Self::NullArrayParameter => &NULL_ARRAY_PARAMETER,
            Self::NegativeStartFrom => &NEGATIVE_START_FROM,
            Self::NegativePageSize => &NEGATIVE_PAGE_SIZE,
            Self::MaxPageSize => &MAX_PAGE_SIZE,
            Self::NullEnum => &NULL_ENUM,
            Self::NullText => &NULL_TEXT,
            Self::NullObject => &NULL_OBJECT,
            Self::NullSearchString => &NULL_SEARCH_STRING,
            Self::ClientSideRestApiError => &CLIENT_SIDE_REST_API_ERROR,
            Self::ExceptionResponseFromApi => &EXCEPTION_RESPONSE_FROM_API,
            Self::UnexpectedResponse => &UNEXPECTED_RESPONSE,
        }
    }

    /// Shorthand for `self.record().message_id`.
    pub fn message_id(&self) -> &'static str {
        self.record().message_id
    }

    /// Shorthand for `self.record().http_error_code`.
    pub fn http_error_code(&self) -> u16 {
        self.record().http_error_code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SERVER_URL_NOT_SPECIFIED: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-001",
    message_template: "The OMAG Server Platform URL is null",
    system_action: "The system is unable to identify the OMAG Server Platform.",
    user_action: "Create a new client and pass the URL for the server on the constructor.",
};

const SERVER_URL_MALFORMED: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-002",
    message_template: "The OMAG Server Platform URL: {0} is not in a recognized format",
    system_action: "The system is unable to connect to the OMAG Server Platform to fulfill any requests.",
    user_action: "Create a new client and pass the correct URL for the server on the constructor.",
};

const SERVER_NAME_NOT_SPECIFIED: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-003",
    message_template: "The OMAG Server name is null",
    system_action: "The system is unable to locate the OMAG Server to fulfill any request.",
    user_action: "Create a new client and pass the correct name for the server on the constructor.",
};

const NULL_USER_ID: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-004",
    message_template: "The user identifier (user_id) passed on the {0} operation is null",
    system_action: "The system is unable to process the request without a user id.",
    user_action: "Correct the code in the caller to provide the user id.",
};

const NULL_GUID: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-005",
    message_template: "The unique identifier (guid) passed on the {0} parameter of the {1} operation is null",
    system_action: "The system is unable to process the request without a guid.",
    user_action: "Correct the code in the caller to provide the guid.",
};

const NULL_NAME: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-006",
    message_template: "The name passed on the {0} parameter of the {1} operation is null",
    system_action: "The system is unable to process the request without a name.",
    user_action: "Correct the code in the caller to provide the name on the parameter.",
};

const NULL_ARRAY_PARAMETER: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-007",
    message_template: "The array value passed on the {0} parameter of the {1} operation is null or empty",
    system_action: "The system is unable to process the request without this value.",
    user_action: "Correct the code in the caller to provide the array.",
};

const NEGATIVE_START_FROM: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-008",
    message_template: "The starting point for the results {0}, passed on the {1} parameter of the {2} operation, is negative",
    system_action: "The system is unable to process the request with this invalid value. It should be zero for the start of the values, or a number greater than 0 to start partway down the list.",
    user_action: "Correct the code in the caller to provide a non-negative value for the starting point.",
};

const NEGATIVE_PAGE_SIZE: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-009",
    message_template: "The page size for the results {0}, passed on the {1} parameter of the {2} operation, is negative",
    system_action: "The system is unable to process the request with this invalid value. It should be zero to return all the result, or greater than zero to set a maximum.",
    user_action: "Correct the code in the caller to provide a non-negative value for the page size.",
};

const MAX_PAGE_SIZE: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-010",
    message_template: "The number of records to return, {0}, passed on the {1} parameter of the {2} operation, is greater than the allowable maximum of {3}",
    system_action: "The system is unable to process the request with this page size value.",
    user_action: "Correct the code in the caller to provide a smaller page size.",
};

const NULL_ENUM: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-012",
    message_template: "The enumeration value passed on the {0} parameter of the {1} operation is null",
    system_action: "The system is unable to process the request without an enumeration value.",
    user_action: "Correct the code in the caller to provide the enumeration value.",
};

const NULL_TEXT: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-013",
    message_template: "The text field passed on the {0} parameter of the {1} operation is null",
    system_action: "The system is unable to process the request without this text value.",
    user_action: "Correct the code in the caller to provide a value in the text field.",
};

const NULL_OBJECT: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-015",
    message_template: "The object passed on the {0} parameter of the {1} operation is null",
    system_action: "The system is unable to process the request without this object.",
    user_action: "Correct the code in the caller to provide the object.",
};

const NULL_SEARCH_STRING: ErrorRecord = ErrorRecord {
    http_error_code: 400,
    message_id: "OMAG-COMMON-400-022",
    message_template: "The search string passed on the {0} parameter of the {1} operation is null",
    system_action: "The system is unable to process the request without a search string.",
    user_action: "Correct the code in the caller to provide the search string.",
};

const CLIENT_SIDE_REST_API_ERROR: ErrorRecord = ErrorRecord {
    http_error_code: 503,
    message_id: "CLIENT-SIDE-REST-API-CONNECTOR-503-002",
    message_template: "A client-side exception {0} was received by method {1} from API call {2}. The error message was {3}",
    system_action: "The client has issued a call to the open metadata access service REST API in a remote server and has received an exception from the local client libraries.",
    user_action: "Review the error message to determine the cause of the error. Check that the server is running and the URL is correct. Look for errors in the local server's console to understand and correct the cause of the error. Then rerun the request.",
};

const EXCEPTION_RESPONSE_FROM_API: ErrorRecord = ErrorRecord {
    http_error_code: 503,
    message_id: "CLIENT-SIDE-REST-API-CONNECTOR-503-003",
    message_template: "A {0} exception was received by method {1} from REST API call {2}: error message was: {3}",
    system_action: "The system has issued a call to an open metadata access service REST API in a remote server and has received an exception response.",
    user_action: "The error message should indicate the cause of the error. Otherwise look for errors in the remote server's audit log and console to understand and correct the source of the error.",
};

const UNEXPECTED_RESPONSE: ErrorRecord = ErrorRecord {
    http_error_code: 500,
    message_id: "CLIENT-SIDE-REST-API-CONNECTOR-500-004",
    message_template: "An unexpected response with status {0} was received by method {1} from REST API call {2}",
    system_action: "The system has issued a call to a REST API in a remote server and could not classify the response.",
    user_action: "Check that the URL addresses an OMAG Server Platform and that client and platform versions are compatible. Look for errors in the remote server's audit log.",
};

/// Replace `{N}` placeholders with `args[N]`, scanning the template once.
fn format_template<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut result = String::with_capacity(template.len() + 32);
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            result.push(ch);
            continue;
        }

        let mut digits = String::new();
        let mut found_end = false;
        while let Some(&next) = chars.peek() {
            if next == '}' {
                chars.next();
                found_end = true;
                break;
            } else if next.is_ascii_digit() {
                digits.push(next);
                chars.next();
            } else {
                break;
            }
        }

        let arg = if found_end {
            digits.parse::<usize>().ok().and_then(|i| args.get(i))
        } else {
            None
        };

        match arg {
            Some(value) => result.push_str(value.as_ref()),
            None => {
                // not a placeholder we can fill, copy it through
                result.push('{');
                result.push_str(&digits);
                if found_end {
                    result.push('}');
                }
            }
        }
    }

    result
}
