use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "expense_core=info";

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the
/// default `expense_core=info` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // Another subscriber may already be installed by the embedding app.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Trims `input` and replaces every run of non-alphanumeric characters with a
/// single underscore, for use inside generated file names.
pub fn file_slug(input: &str) -> String {
    slug_keeping(input, char::is_alphanumeric)
}

/// Slug for document numbers: `/` becomes `-` and dashes survive, so
/// `2025/03/7` gives `2025-03-7`. Path separators and other punctuation are
/// replaced as in [`file_slug`].
pub fn number_slug(input: &str) -> String {
    let dashed = input.replace('/', "-");
    slug_keeping(&dashed, |ch| ch.is_alphanumeric() || ch == '-')
}

fn slug_keeping(input: &str, keep: impl Fn(char) -> bool) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut in_gap = false;
    for ch in input.trim().chars() {
        if keep(ch) {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('_');
            in_gap = true;
        }
    }
    slug
}
