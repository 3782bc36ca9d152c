//! Plain-text views printed by the CLI.

use bookmarky_core::overview::Page;
use bookmarky_core::routes::Route;
use bookmarky_store::Bookmark;
use std::fmt::Write as _;

/// The overview list for one page, numbered across the whole collection.
pub fn overview(page: &Page<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", Route::Overview.title());
    if page.total_items == 0 {
        out.push_str("No bookmarks yet.\n");
        return out;
    }
    for (i, bookmark) in page.items.iter().enumerate() {
        let n = page.offset + i + 1;
        let _ = writeln!(out, "{n:>4}. {}", bookmark.title);
        let _ = writeln!(out, "      {}", bookmark.url);
        let _ = writeln!(out, "      id: {}", bookmark.id);
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} bookmarks)",
        page.number, page.total_pages, page.total_items
    );
    out
}

/// Shown once after a bookmark was created.
pub fn results(bookmark: &Bookmark) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", Route::Results.title());
    out.push_str(&bookmark_fields(bookmark));
    out
}

pub fn bookmark(bookmark: &Bookmark) -> String {
    bookmark_fields(bookmark)
}

fn bookmark_fields(bookmark: &Bookmark) -> String {
    format!(
        "Title: {}\nURL:   {}\nID:    {}\n",
        bookmark.title, bookmark.url, bookmark.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(n: usize) -> Bookmark {
        Bookmark {
            id: format!("id-{n}"),
            url: format!("https://example.com/{n}"),
            title: format!("Example {n}"),
        }
    }

    #[test]
    fn empty_overview() {
        let page = Page {
            number: 1,
            total_pages: 0,
            total_items: 0,
            offset: 0,
            items: &[],
        };
        assert_eq!(overview(&page), "Bookmark Overview\nNo bookmarks yet.\n");
    }

    #[test]
    fn numbered_across_pages() {
        let items = [sample(20), sample(21)];
        let page = Page {
            number: 2,
            total_pages: 2,
            total_items: 22,
            offset: 20,
            items: &items,
        };
        assert_eq!(
            overview(&page),
            "\
Bookmark Overview
  21. Example 20
      https://example.com/20
      id: id-20
  22. Example 21
      https://example.com/21
      id: id-21
Page 2 of 2 (22 bookmarks)
"
        );
    }

    #[test]
    fn results_view() {
        assert_eq!(
            results(&sample(1)),
            "\
Bookmark Submission Result
Title: Example 1
URL:   https://example.com/1
ID:    id-1
"
        );
    }
}
