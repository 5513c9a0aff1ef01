//! String transformation utilities for contract names and generated identifiers

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            // Add underscore before uppercase letter if:
            // - Not at the start
            // - Previous character was lowercase or a digit
            if i > 0 && prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if ch == '-' || ch == '_' || ch == ' ' || ch == '.' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Convert a string to lowerCamelCase
pub fn to_lower_camel_case(s: &str) -> String {
    let upper_camel = to_upper_camel_case(s);
    let mut chars = upper_camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Strip the package path from a fully qualified contract name.
///
/// `com.spectralogic.s3.server.domain.JobWithChunksApiBean` becomes
/// `JobWithChunksApiBean`. Names without a path are returned unchanged.
pub fn remove_path(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    }
}

/// Derive the SDK request name from a request handler name.
///
/// The trailing `Handler` is dropped; SpectraS3 requests get a `SpectraS3`
/// marker ahead of the `Request` suffix so they never collide with the
/// Amazon S3 request of the same name.
pub fn request_name(handler: &str, spectra: bool) -> String {
    let simple = remove_path(handler);
    let base = simple.strip_suffix("Handler").unwrap_or(simple);
    let stem = base.strip_suffix("Request").unwrap_or(base);
    if spectra {
        format!("{}SpectraS3Request", stem)
    } else {
        format!("{}Request", stem)
    }
}

/// Derive the response name paired with a request name
pub fn response_name(request_name: &str) -> String {
    let stem = request_name.strip_suffix("Request").unwrap_or(request_name);
    format!("{}Response", stem)
}
