use crate::config::Selectors;
use crate::error::{Result, WatchError};
use crate::results::{DetailRecord, TeaserRecord};
use scraper::{ElementRef, Html, Selector};

/// Parses a rendered search results page into teaser records
///
/// The record count is the number of bookmark elements. Every other field
/// at position `i` is the `i`-th match of its selector across the whole
/// page, so fields line up by position rather than by container.
pub fn parse_search_page(html: &str, selectors: &Selectors) -> Result<Vec<TeaserRecord>> {
    let doc = Html::parse_document(html);

    let count = doc.select(&compile(&selectors.bookmark)?).count();
    ::log::debug!("HTML parser found {} teaser bookmarks", count);

    let outcomes = collect(&doc, &selectors.outcome)?;
    let statuses = collect(&doc, &selectors.status)?;
    let decision_dates = collect(&doc, &selectors.decision_date)?;
    let headings = collect(&doc, &selectors.heading)?;
    let heading_links = collect(&doc, &selectors.heading_link)?;
    let decisions = collect(&doc, &selectors.decision)?;
    let decision_links = collect(&doc, &selectors.decision_link)?;

    let teasers = (0..count)
        .map(|i| TeaserRecord {
            index: i,
            heading: text_at(&headings, i).unwrap_or_default(),
            outcome: text_at(&outcomes, i),
            status: text_at(&statuses, i),
            decision_date: text_at(&decision_dates, i).unwrap_or_default(),
            decision_link: text_at(&decisions, i).and_then(|_| href_at(&decision_links, i)),
            detail_link: href_at(&heading_links, i),
        })
        .collect();

    Ok(teasers)
}

/// Parses a protest's detail page; missing fields come back empty
pub fn parse_detail_page(html: &str, selectors: &Selectors) -> Result<DetailRecord> {
    let doc = Html::parse_document(html);

    Ok(DetailRecord {
        case_type: first_text(&doc, &selectors.case_type)?,
        filed_date: first_text(&doc, &selectors.filed_date)?,
        due_date: first_text(&doc, &selectors.due_date)?,
    })
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| WatchError::Selector(selector.to_string()))
}

fn collect<'a>(doc: &'a Html, selector: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = compile(selector)?;
    Ok(doc.select(&selector).collect())
}

fn first_text(doc: &Html, selector: &str) -> Result<String> {
    let selector = compile(selector)?;
    Ok(doc
        .select(&selector)
        .next()
        .map(|e| inner_text(&e))
        .unwrap_or_default())
}

/// Text of the `i`-th element, or None when it is missing or blank
fn text_at(elements: &[ElementRef<'_>], i: usize) -> Option<String> {
    elements
        .get(i)
        .map(inner_text)
        .filter(|text| !text.is_empty())
}

fn href_at(elements: &[ElementRef<'_>], i: usize) -> Option<String> {
    elements
        .get(i)
        .and_then(|e| e.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Element text with runs of whitespace collapsed to one space
fn inner_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
