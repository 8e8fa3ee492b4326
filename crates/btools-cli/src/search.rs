//! `search` and the shared catalog/session plumbing used by `saved run`.

use btools_catalog::{load_catalog_or_fallback, CatalogClient, CatalogOrigin, CatalogSource};
use btools_core::{AppConfig, Blogger, FilterCriteria};
use btools_query::{QueryContext, QuerySession, ResultView};
use btools_store::Store;

/// Loads the configured catalog, falling back to the demo dataset.
pub(crate) async fn load_bloggers(config: &AppConfig) -> anyhow::Result<Vec<Blogger>> {
    let client = CatalogClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
    let source = CatalogSource::parse(&config.catalog);
    let loaded = load_catalog_or_fallback(&source, &client).await;
    if loaded.origin == CatalogOrigin::Fallback {
        tracing::warn!(source = %source, "showing demo data");
    } else {
        tracing::debug!(source = %source, bloggers = loaded.bloggers.len(), "catalog loaded");
    }
    Ok(loaded.bloggers)
}

fn fmt_price(price: Option<f64>) -> String {
    price.map_or_else(|| "\u{2014}".to_string(), |p| format!("${p}"))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

pub(crate) fn print_view(view: &ResultView, limit: usize) {
    if !view.active_filters.is_empty() {
        println!("Filters: {}", view.active_filters.join(" | "));
    }
    if let Some(placeholder) = &view.placeholder {
        println!("{placeholder}");
        println!("Selected: {}", view.selected_count);
        return;
    }

    println!(
        "{:<3}{:<14}{:<24}{:<11}{:<14}{:>11}{:>7}{:>10}",
        "", "ID", "NAME", "PLATFORM", "CATEGORY", "FOLLOWERS", "ER", "PRICE"
    );
    for item in view.items.iter().take(limit) {
        let b = &item.blogger;
        let mark = if item.selected { "*" } else { "" };
        println!(
            "{:<3}{:<14}{:<24}{:<11}{:<14}{:>11}{:>7}{:>10}",
            mark,
            truncate(&b.id, 12),
            truncate(&b.name, 22),
            truncate(&b.platform, 10),
            truncate(&b.category, 12),
            b.followers,
            format!("{:.1}", b.engagement_rate),
            fmt_price(item.usd_price),
        );
    }
    if view.total > limit {
        println!("... {} more (use --limit)", view.total - limit);
    }
    println!("Total: {}  Selected: {}", view.total, view.selected_count);
}

/// Runs `criteria` against the catalog and prints the result view.
///
/// # Errors
///
/// Returns an error if the catalog client cannot be built or JSON output
/// fails to serialize.
pub(crate) async fn run_search(
    config: &AppConfig,
    store: &Store,
    criteria: &FilterCriteria,
    json: bool,
    limit: usize,
) -> anyhow::Result<()> {
    let bloggers = load_bloggers(config).await?;
    let mut session = QuerySession::with_sink(
        bloggers,
        QueryContext::from_config(config),
        store.read_selection(),
        store.clone(),
    );
    session.set_criteria(criteria);
    let mut view = session.refresh();

    if json {
        view.items.truncate(limit);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view, limit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use btools_core::SelectionSet;
    use btools_query::materialize;

    #[test]
    fn price_placeholder_for_unknown() {
        assert_eq!(fmt_price(None), "\u{2014}");
        assert_eq!(fmt_price(Some(1250.0)), "$1250");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Привет мир", 6), "Привет...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn print_view_handles_empty_results() {
        let view = materialize(&[], &SelectionSet::new(), Vec::new());
        print_view(&view, 10);
    }

    fn config_with_catalog(catalog: &str) -> AppConfig {
        AppConfig {
            env: btools_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_string(),
            catalog: catalog.to_string(),
            data_dir: std::env::temp_dir(),
            api_keys: Vec::new(),
            catalog_timeout_secs: 1,
            catalog_user_agent: "btools-test".to_string(),
            catalog_max_retries: 0,
            catalog_retry_backoff_ms: 1,
            saved_searches_max: 10,
            gender_dominance_min: btools_query::DEFAULT_GENDER_DOMINANCE_MIN,
        }
    }

    #[tokio::test]
    async fn missing_catalog_falls_back_to_demo_data() {
        let config = config_with_catalog("/nonexistent/btools/bloggers.json");
        let bloggers = load_bloggers(&config).await.unwrap();
        let ids: Vec<&str> = bloggers.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["b101", "b102", "b103"]);
    }
}
