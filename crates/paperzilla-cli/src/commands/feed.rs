use std::fmt::Write;

use anyhow::{Context as _, Result};
use clap::Args;
use paperzilla_core::models::{FeedItem, FeedOptions, FeedPage};

use crate::utils::{format_timestamp, truncate_string};

use super::Context;

/// Maximum title width in the default feed view
const TITLE_WIDTH: usize = 80;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Project ID
    pub project_id: String,

    /// Print the raw feed page as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Only show must-read papers
    #[arg(short, long)]
    pub must_read: bool,

    /// Only show papers since this date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub since: Option<String>,

    /// Maximum number of papers to return
    #[arg(short = 'n', long, value_name = "N", default_value_t = 0, hide_default_value = true)]
    pub limit: u32,

    /// Number of papers to skip
    #[arg(long, value_name = "N", default_value_t = 0, hide_default_value = true)]
    pub offset: u32,

    /// Print the Atom feed URL instead of the papers
    #[arg(long, conflicts_with = "json")]
    pub atom: bool,
}

impl FeedArgs {
    fn options(&self) -> FeedOptions {
        FeedOptions {
            must_read_only: self.must_read,
            since: self.since.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

pub async fn run(ctx: &Context, args: &FeedArgs) -> Result<()> {
    let tokens = ctx.authenticate().await?;

    if args.atom {
        let feed_token = ctx
            .api
            .fetch_feed_token(&tokens.access_token)
            .await
            .context("failed to get feed token")?;
        println!("{}", ctx.api.atom_feed_url(&args.project_id, &feed_token.token));
        return Ok(());
    }

    let page = ctx
        .api
        .fetch_feed(&tokens.access_token, &args.project_id, &args.options())
        .await
        .context("failed to fetch feed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    let project = ctx
        .api
        .fetch_project(&tokens.access_token, &args.project_id)
        .await
        .context("failed to fetch project")?;

    print!("{}", render_feed(&project.name, &page));
    Ok(())
}

pub fn render_feed(project_name: &str, page: &FeedPage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} — {} papers (total: {})",
        project_name,
        page.items.len(),
        page.total
    );

    for item in &page.items {
        out.push('\n');
        render_item(&mut out, item);
    }
    out
}

fn render_item(out: &mut String, item: &FeedItem) {
    let badge = if item.is_must_read() {
        "★ Must Read"
    } else {
        "○ Related"
    };
    let title = if item.paper_title.is_empty() {
        &item.paper.title
    } else {
        &item.paper_title
    };

    let _ = writeln!(out, "{}  {}", badge, truncate_string(title, TITLE_WIDTH));
    let _ = writeln!(
        out,
        "  {} · {} · {} · relevance: {}%",
        item.paper.author_label(),
        item.paper.source.name(),
        format_timestamp(item.paper.published_date.as_deref()),
        item.relevance_percent()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperzilla_core::models::{Author, Paper, PaperSource, RelevanceClass};

    fn item(title: &str, class: RelevanceClass, score: f64) -> FeedItem {
        FeedItem {
            id: "fp-1".into(),
            paper_title: title.into(),
            relevance_score: score,
            relevance_class: class,
            paper: Paper {
                title: title.into(),
                authors: vec![
                    Author { name: "Jane Smith".into() },
                    Author { name: "Bo Li".into() },
                ],
                published_date: Some("2025-08-02".into()),
                source: PaperSource::Arxiv,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_render_feed_header_and_items() {
        let mut first = item("Agents that use tools", RelevanceClass::MustRead, 0.95);
        first.paper.published_date = Some("2025-08-02T14:30:00Z".into());
        let page = FeedPage {
            items: vec![
                first,
                item("A survey of retrieval", RelevanceClass::Related, 0.421),
            ],
            total: 37,
            limit: 2,
            offset: 0,
        };

        let out = render_feed("LLM Agents", &page);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "LLM Agents — 2 papers (total: 37)");
        assert_eq!(lines[2], "★ Must Read  Agents that use tools");
        assert_eq!(lines[3], "  Smith et al. · arxiv · 2025-08-02 14:30 · relevance: 95%");
        assert_eq!(lines[5], "○ Related  A survey of retrieval");
        assert_eq!(lines[6], "  Smith et al. · arxiv · 2025-08-02 · relevance: 42%");
    }

    #[test]
    fn test_render_feed_truncates_long_titles() {
        let long_title = "word ".repeat(30);
        let page = FeedPage {
            items: vec![item(&long_title, RelevanceClass::Related, 0.5)],
            total: 1,
            ..Default::default()
        };

        let out = render_feed("P", &page);
        let title_line = out.lines().nth(2).unwrap();
        let title = title_line.trim_start_matches("○ Related  ");
        assert_eq!(title.chars().count(), TITLE_WIDTH);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_render_empty_feed() {
        let out = render_feed("Empty", &FeedPage::default());
        assert_eq!(out, "Empty — 0 papers (total: 0)\n");
    }

    #[test]
    fn test_options_from_args() {
        let args = FeedArgs {
            project_id: "proj-1".into(),
            json: false,
            must_read: true,
            since: None,
            limit: 5,
            offset: 0,
            atom: false,
        };
        assert_eq!(
            args.options().query_pairs(),
            vec![("must_read", "true".to_string()), ("limit", "5".to_string())]
        );
    }
}
