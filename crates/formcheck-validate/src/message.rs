//! Message arguments and template formatting.
//!
//! Templates use positional placeholders: `{0}`, `{1}` select an argument by
//! index, `{}` takes the next argument in order, and `{{` / `}}` produce
//! literal braces. Placeholders without a matching argument are left as
//! written, so a template with named slots such as `{min}` passes through
//! untouched.

/// A positional message argument.
pub type MessageArg = serde_json::Value;

/// Convert a number into a message argument.
///
/// Whole numbers render without a fractional part (`18`, not `18.0`) so that
/// default and translated messages agree. NaN and the infinities have no JSON
/// number form and become the strings `NaN`, `inf` and `-inf`.
pub fn number_arg(n: f64) -> MessageArg {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if !n.is_finite() {
        serde_json::Value::String(n.to_string())
    } else if n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Value::from(n)
    }
}

/// Render one argument the way it appears inside a message.
pub fn render_arg(arg: &MessageArg) -> String {
    match arg {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => arg.to_string(),
    }
}

/// Substitute `args` into `template`.
pub fn format_message(template: &str, args: &[MessageArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('}') {
            out.push('}');
            rest = after.strip_prefix('}').unwrap_or(after);
            continue;
        }

        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            rest = "";
            break;
        };
        let inner = &tail[1..close];
        let slot = if inner.is_empty() {
            next += 1;
            Some(next - 1)
        } else {
            inner.trim().parse::<usize>().ok()
        };
        match slot.and_then(|n| args.get(n)) {
            Some(arg) => out.push_str(&render_arg(arg)),
            None => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    out
}
