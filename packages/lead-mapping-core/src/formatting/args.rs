use crate::error::MappingError;

/// Splits a formatting call into function name and arguments.
///
/// `function` may carry inline arguments after the name
/// (`"add_prefix, Mr. "`); `parameters` appends further arguments given as
/// a JSON array or a comma-separated list.
///
/// # Returns
/// `(name, args)`, or `FormattingFailed` if `parameters` is a malformed JSON array.
pub fn parse_function_call(
    function: &str,
    parameters: Option<&str>,
) -> Result<(String, Vec<String>), MappingError> {
    let mut parts = function.split(',').map(str::trim);
    let name = parts.next().unwrap_or_default().to_string();
    let mut args: Vec<String> = parts.map(str::to_string).collect();

    let parameters = parameters.map(str::trim).unwrap_or_default();
    if parameters.starts_with('[') {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(parameters).map_err(|e| MappingError::FormattingFailed {
                function: name.clone(),
                message: format!("invalid function parameters: {}", e),
            })?;
        args.extend(values.into_iter().map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }));
    } else if !parameters.is_empty() {
        args.extend(parameters.split(',').map(|p| p.trim().to_string()));
    }

    Ok((name, args))
}
