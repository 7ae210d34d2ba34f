// SPDX-License-Identifier: MPL-2.0
//! Call shapes accepted by the notifier and their normalization.
//!
//! A call arrives in one of three shapes and is resolved once, at the
//! boundary, into a single [`Invocation`]:
//!
//! - `(type, message, options?)`
//! - `(message, options?)`, rendered as info
//! - `{ type, message, title, ...options }`

use crate::config::OptionsOverride;
use crate::ui::notifications::Severity;
use serde::Deserialize;
use serde_json::Value;

/// A notification request, before normalization.
#[derive(Debug, Clone)]
pub enum Call {
    /// Explicit type and message. Unknown types render as info.
    Typed {
        kind: String,
        message: String,
        title: Option<String>,
        options: OptionsOverride,
    },
    /// Message only; always info.
    Message {
        message: String,
        options: OptionsOverride,
    },
    /// A single configuration object.
    Config(ToastRequest),
}

/// The configuration-object call shape.
///
/// Option keys sit next to `type`, `message` and `title`, as in
/// `{"type": "error", "message": "Oops", "timeOut": 0}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToastRequest {
    #[serde(rename = "type", deserialize_with = "crate::config::lenient")]
    pub kind: Option<String>,
    pub message: Option<Value>,
    pub title: Option<Value>,
    #[serde(flatten)]
    pub options: OptionsOverride,
}

impl ToastRequest {
    /// Reads a request from an object. Ill-typed fields are left unset and
    /// the rest of the request still applies.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value::<ToastRequest>(value.clone()) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(%err, "ignoring malformed options in toast request");
                ToastRequest {
                    kind: value.get("type").and_then(Value::as_str).map(str::to_string),
                    message: value.get("message").cloned(),
                    title: value.get("title").cloned(),
                    options: OptionsOverride::default(),
                }
            }
        }
    }
}

/// The canonical form every call is reduced to.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub severity: Severity,
    pub message: String,
    pub title: Option<String>,
    pub options: OptionsOverride,
}

impl Call {
    /// Shorthand for a typed call without title or options.
    pub fn typed(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Call::Typed {
            kind: kind.into(),
            message: message.into(),
            title: None,
            options: OptionsOverride::default(),
        }
    }

    /// Shorthand for a message-only call.
    pub fn message(message: impl Into<String>) -> Self {
        Call::Message {
            message: message.into(),
            options: OptionsOverride::default(),
        }
    }

    /// Sniffs a loosely-typed argument list.
    ///
    /// Returns `None` when no message can be derived.
    #[must_use]
    pub fn from_args(args: &[Value]) -> Option<Self> {
        let first = args.first()?;
        let second = args.get(1);

        if let Value::Object(_) = first {
            return Some(Call::Config(ToastRequest::from_value(first)));
        }

        let Some(first_text) = coerce_text(first) else {
            tracing::debug!("dropping notification without a message");
            return None;
        };

        match second {
            Some(Value::String(message)) if !message.is_empty() && first.is_string() => {
                Some(Call::Typed {
                    kind: first_text,
                    message: message.clone(),
                    title: None,
                    options: args
                        .get(2)
                        .map(OptionsOverride::from_value)
                        .unwrap_or_default(),
                })
            }
            Some(options @ Value::Object(_)) => Some(Call::Message {
                message: first_text,
                options: OptionsOverride::from_value(options),
            }),
            _ => Some(Call::message(first_text)),
        }
    }

    /// Reduces this call to its canonical invocation.
    ///
    /// Returns `None` for a configuration object without a usable message.
    #[must_use]
    pub fn resolve(self) -> Option<Invocation> {
        match self {
            Call::Typed {
                kind,
                message,
                title,
                options,
            } => {
                if message.is_empty() {
                    return Call::Message {
                        message: kind,
                        options,
                    }
                    .resolve();
                }
                Some(Invocation {
                    severity: Severity::resolve(&kind),
                    message,
                    title,
                    options,
                })
            }
            Call::Message { message, options } => Some(Invocation {
                severity: Severity::Info,
                message,
                title: None,
                options,
            }),
            Call::Config(request) => {
                let message = request.message.as_ref().and_then(coerce_text)?;
                Some(Invocation {
                    severity: request
                        .kind
                        .as_deref()
                        .map(Severity::parse)
                        .unwrap_or_default(),
                    message,
                    title: request.title.as_ref().and_then(coerce_text),
                    options: request.options,
                })
            }
        }
    }
}

/// Coerces scalars to text. `null`, arrays and objects have none.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
