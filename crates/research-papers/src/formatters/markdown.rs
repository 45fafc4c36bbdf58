//! Markdown output formatting.

use crate::models::Paper;

/// Format a list of papers as Markdown.
#[must_use]
pub fn format_papers_markdown(papers: &[Paper]) -> String {
    if papers.is_empty() {
        return "No papers found.".to_string();
    }

    let mut output = format!("# Papers ({} results)\n\n", papers.len());

    for (i, paper) in papers.iter().enumerate() {
        output.push_str(&format_paper_markdown(paper, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single paper as Markdown.
#[must_use]
pub fn format_paper_markdown(paper: &Paper, index: usize) -> String {
    let mut output = String::new();

    // Title, linked when there is somewhere to go
    if paper.has_link() {
        output.push_str(&format!("## {}. [{}]({})\n\n", index, paper.title, paper.url));
    } else {
        output.push_str(&format!("## {}. {}\n\n", index, paper.title));
    }

    if !paper.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", paper.author_names()));
    }

    // Year and citations
    let mut meta = Vec::new();
    if let Some(year) = paper.year {
        meta.push(format!("**Year**: {year}"));
    }
    if let Some(citations) = paper.citation_count {
        meta.push(format!("**Citations**: {citations}"));
    }
    if !meta.is_empty() {
        output.push_str(&format!("{}\n\n", meta.join(" | ")));
    }

    output.push_str(&format!("**Abstract**: {}\n\n", paper.r#abstract));
    output.push_str(&format!("**Summary**: {}\n\n", paper.summary));
    output.push_str(&format!("**Key Insights**:\n{}\n", paper.insights));

    output
}
