//! Connection URL translation for the secured JDBC driver.
//!
//! Client tooling hands us a generic connection URL of the shape
//! `[scheme://][user:password@]host[:port][/path][?key=value&...]`. The native
//! driver wants something else entirely: a driver class name, a native
//! `jdbc:secured:ssl://...` URL carrying the `CustomProperties` clause, and the
//! credentials as out-of-band driver arguments.
//!
//! # Known limitations
//!
//! - Only the first and last `@`-separated segments are used. A password that
//!   contains `@` loses everything after its first `@`.
//! - Credentials are split on `:`. A password that contains `:` is truncated at
//!   its first `:`.
//!
//! Both cases are logged at `warn` level rather than corrected.

mod url_tests;

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Fully-qualified class name of the native driver.
pub const DRIVER_CLASS_NAME: &str = "com.sotero.jdbc.openaccess.OpenAccessDriver";

/// Scheme name used when synthesizing a native driver URL.
pub const DIALECT_SCHEME: &str = "secured:ssl";

/// Query parameter carrying the driver's dataset configuration.
pub const CUSTOM_PROPERTIES: &str = "CustomProperties";

const NATIVE_PREFIX: &str = "jdbc";
const NATIVE_SCHEME_PREFIX: &str = "jdbc:";
const SCHEME_SEPARATOR: &str = "//";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Malformed connection URL: {message}")]
    Parse { message: String },

    #[error("Connection URL is missing required parameter '{name}'")]
    MissingParameter { name: String },
}

impl UrlError {
    fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Username and password handed to the driver outside the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Parse a `user:password` segment.
    fn parse(segment: &str) -> Result<Self, UrlError> {
        let mut fields = segment.split(':');
        let username = fields.next().unwrap_or_default();
        let password = fields.next().ok_or_else(|| {
            UrlError::parse("credentials must be given as 'user:password' before '@'")
        })?;

        if fields.next().is_some() {
            warn!("password contains ':'; only the text before it is passed to the driver");
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Named driver arguments, serialized with the driver's own key names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverKwargs {
    driver_class_name: &'static str,
    url: String,
    driver_args: [String; 2],
}

/// Everything needed to open a connection through the native driver.
///
/// Positional arguments are always empty; the driver is configured entirely
/// through [`DriverKwargs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectArgs {
    args: Vec<String>,
    kwargs: DriverKwargs,
}

impl ConnectArgs {
    fn new(url: String, credentials: Credentials) -> Self {
        Self {
            args: Vec::new(),
            kwargs: DriverKwargs {
                driver_class_name: DRIVER_CLASS_NAME,
                url,
                driver_args: [credentials.username, credentials.password],
            },
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn driver_class_name(&self) -> &str {
        self.kwargs.driver_class_name
    }

    /// Native driver URL. Never contains the credentials.
    pub fn url(&self) -> &str {
        &self.kwargs.url
    }

    pub fn username(&self) -> &str {
        &self.kwargs.driver_args[0]
    }

    pub fn password(&self) -> &str {
        &self.kwargs.driver_args[1]
    }

    /// Credentials in the order the driver expects them.
    pub fn driver_args(&self) -> &[String; 2] {
        &self.kwargs.driver_args
    }

    pub fn kwargs(&self) -> &DriverKwargs {
        &self.kwargs
    }
}

/// Translate an optional connection URL.
///
/// Returns `Ok(None)` when no URL was given, which callers treat as "do not
/// attempt a connection".
pub fn translate(url: Option<&str>) -> Result<Option<ConnectArgs>, UrlError> {
    url.map(translate_url).transpose()
}

/// Translate a connection URL into native driver arguments.
pub fn translate_url(url: &str) -> Result<ConnectArgs, UrlError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlError::parse("connection URL is empty"));
    }

    let parts = UrlParts::split(url)?;

    let credentials = match parts.credentials {
        Some(segment) => Credentials::parse(segment)?,
        None => Credentials::default(),
    };

    let native_url = if parts.bare.starts_with(NATIVE_PREFIX) {
        parts.bare
    } else {
        let params = parse_query(parts.query);
        let custom_properties = params
            .get(CUSTOM_PROPERTIES)
            .and_then(|values| values.first())
            .ok_or_else(|| UrlError::MissingParameter {
                name: CUSTOM_PROPERTIES.to_string(),
            })?;
        format!(
            "{}:{}://{};{}={}",
            NATIVE_PREFIX, DIALECT_SCHEME, parts.bare, CUSTOM_PROPERTIES, custom_properties
        )
    };

    debug!(url = %native_url, username = %credentials.username, "translated connection URL");

    Ok(ConnectArgs::new(native_url, credentials))
}

/// A connection URL cut into the pieces the translator cares about.
#[derive(Debug)]
struct UrlParts<'a> {
    /// `user:password` segment, if the URL had an `@`.
    credentials: Option<&'a str>,
    /// Host, port and path without the query string.
    bare: String,
    /// Raw query string, without the leading `?`.
    query: &'a str,
}

impl<'a> UrlParts<'a> {
    fn split(url: &'a str) -> Result<Self, UrlError> {
        let (scheme, rest) = match url.split_once(SCHEME_SEPARATOR) {
            Some((scheme, rest)) => (Some(scheme), rest),
            None => (None, url),
        };

        let segments: Vec<&str> = rest.split('@').collect();
        let (credentials, authority) = match segments.as_slice() {
            [authority] => (None, *authority),
            [first, .., last] => {
                if segments.len() > 2 {
                    warn!("connection URL contains more than one '@'; middle segments are ignored");
                }
                (Some(*first), *last)
            }
            [] => return Err(UrlError::parse("connection URL is empty")),
        };

        let (authority, query) = match authority.split_once('?') {
            Some((authority, query)) => (authority, query),
            None => (authority, ""),
        };
        let query = query.split('#').next().unwrap_or_default();

        if authority.is_empty() {
            return Err(UrlError::parse("missing host after credentials"));
        }

        // Only a native `jdbc:` scheme is kept; dialect schemes are dropped.
        let bare = match scheme {
            Some(scheme) if scheme.starts_with(NATIVE_SCHEME_PREFIX) => {
                format!("{}{}{}", scheme, SCHEME_SEPARATOR, authority)
            }
            _ => authority.to_string(),
        };

        Ok(Self {
            credentials,
            bare,
            query,
        })
    }
}

/// Parse a query string into `name -> [values]`, percent-decoding both.
///
/// Blank values are dropped, so `CustomProperties=` counts as absent.
pub fn parse_query(query: &str) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        params
            .entry(name.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    params
}
