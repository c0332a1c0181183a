// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::names::AId;
use crate::Error;

const UNIT_SUFFIXES: &[&str] = &["dip", "dp", "px"];

/// Strips a unit suffix from a dimension.
///
/// The number itself is kept as written, so `24.0dp` becomes `24.0`.
pub(crate) fn strip_units(value: &str) -> &str {
    let value = value.trim();
    for suffix in UNIT_SUFFIXES {
        if let Some(v) = value.strip_suffix(suffix) {
            return v.trim_end();
        }
    }

    value
}

/// Resolves a size attribute, like `android:width`.
///
/// A missing attribute is replaced with `default`.
pub(crate) fn resolve_size(aid: AId, value: Option<&str>, default: &str) -> Result<String, Error> {
    let value = match value {
        Some(v) => strip_units(v),
        None => {
            log::warn!("{} is not set. Fallback to {}.", aid, default);
            default
        }
    };

    check_number(aid, value)?;
    Ok(value.to_string())
}

/// Resolves a viewport attribute, like `android:viewportWidth`.
///
/// A missing attribute is replaced with an already resolved size.
pub(crate) fn resolve_viewport(
    aid: AId,
    value: Option<&str>,
    fallback: &str,
) -> Result<String, Error> {
    match value {
        Some(v) => {
            let v = v.trim();
            check_number(aid, v)?;
            Ok(v.to_string())
        }
        None => Ok(fallback.to_string()),
    }
}

fn check_number(aid: AId, value: &str) -> Result<(), Error> {
    match svgtypes::Number::from_str(value) {
        Ok(n) if n.0.is_finite() && n.0 > 0.0 => Ok(()),
        _ => Err(Error::ConversionFailed(format!(
            "{} has an invalid value '{}'",
            aid, value
        ))),
    }
}
