#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use newsclip::extractor::{extract_content, extract_title, rewrite};
use newsclip::fetcher::types::PageResponse;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data).to_string();

    // Rewriting arbitrary markup must never panic
    let _ = rewrite(&html);

    let response = PageResponse::from_html(Url::parse("https://example.com").unwrap(), html);
    let document = response.document();
    let _ = extract_title(&document, &[]);
    if let Ok(markup) = extract_content(&document, "contentDiv") {
        let _ = rewrite(&markup);
    }
});
