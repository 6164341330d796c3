//! Server-rendered HTML for the review surface.
//!
//! Every page is a plain string built from escaped fragments. All review
//! state travels in query or form parameters, so each builder takes the
//! full context it embeds.

use scribe_forms_core::{PageView, SessionId};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters percent-encoded in query string values.
///
/// Covers the query delimiters plus the HTML-sensitive characters, so an
/// encoded value is safe inside an href attribute as well.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?');

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem auto; max-width: 52rem; padding: 0 1rem; }\n\
h1 { font-size: 1.4rem; }\n\
.meta { color: #555; }\n\
.notice { padding: 0.5rem 0.75rem; background: #eef; border-left: 4px solid #88c; }\n\
.notice.saved { background: #efe; border-left-color: #6a6; }\n\
.notice.error { background: #fee; border-left-color: #c66; }\n\
.muted { color: #777; }\n\
.item { border: 1px solid #ddd; border-radius: 4px; padding: 1rem; margin: 1rem 0; }\n\
.item textarea { width: 100%; box-sizing: border-box; }\n\
nav form { display: inline; }\n";

/// Outcome banner shown at the top of a review page after a save attempt.
#[derive(Debug)]
pub(crate) enum PageNotice {
    /// The correction was written through to the session record.
    Saved {
        /// Display title of the saved item.
        title: String,
    },
    /// The write failed and nothing was persisted.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Escape text for HTML element content and attribute values.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Percent-encode a query string value.
pub(crate) fn encode_query(value: &str) -> String {
    utf8_percent_encode(value, QUERY_ENCODE_SET).to_string()
}

/// URL of one review page, with all context encoded into the query.
pub(crate) fn page_url(
    language: &str,
    form: &str,
    name: &str,
    session: &str,
    page: usize,
) -> String {
    format!(
        "/review/page?language={}&form={}&name={}&session={}&page={}",
        encode_query(language),
        encode_query(form),
        encode_query(name),
        encode_query(session),
        page
    )
}

fn page_shell(body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Scribe Forms</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn hidden_field(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        escape_html(name),
        escape_html(value)
    )
}

/// Landing page listing the configured languages.
pub(crate) fn language_page(languages: &[String]) -> String {
    let mut body = String::from("<h1>Transcription review</h1>\n");

    if languages.is_empty() {
        body.push_str("<p class=\"notice\">No languages configured.</p>\n");
    } else {
        body.push_str("<p>Select a language to review.</p>\n<ul>\n");
        for language in languages {
            body.push_str(&format!(
                "<li><a href=\"/review?language={}\">{}</a></li>\n",
                escape_html(&encode_query(language)),
                escape_html(language)
            ));
        }
        body.push_str("</ul>\n");
    }

    page_shell(&body)
}

/// Form-title selector plus the annotator name field.
pub(crate) fn form_page(language: &str, form_titles: &[String]) -> String {
    let mut body = format!("<h1>Review: {}</h1>\n", escape_html(language));

    if form_titles.is_empty() {
        body.push_str("<p class=\"notice\">No forms found for this language.</p>\n");
    } else {
        body.push_str("<form method=\"get\" action=\"/review/session\">\n");
        body.push_str(&hidden_field("language", language));
        body.push_str("<p><label>Form <select name=\"form\">\n");
        for title in form_titles {
            let escaped = escape_html(title);
            body.push_str(&format!(
                "<option value=\"{escaped}\">{escaped}</option>\n"
            ));
        }
        body.push_str("</select></label></p>\n");
        body.push_str(
            "<p><label>Your name <input type=\"text\" name=\"name\" required></label></p>\n",
        );
        body.push_str("<p><button type=\"submit\">Continue</button></p>\n</form>\n");
    }

    body.push_str("<p><a href=\"/\">Back to languages</a></p>\n");
    page_shell(&body)
}

/// Shown when the mapping CSV for a language cannot be loaded.
pub(crate) fn language_unavailable_page(language: &str) -> String {
    let body = format!(
        "<h1>Review: {}</h1>\n<p class=\"notice error\">No data available for this language.</p>\n\
         <p><a href=\"/\">Back to languages</a></p>\n",
        escape_html(language)
    );
    page_shell(&body)
}

/// Shown when the annotator name does not survive normalization.
pub(crate) fn invalid_name_page(language: &str, reason: &str) -> String {
    let body = format!(
        "<h1>Review: {}</h1>\n<p class=\"notice error\">{}</p>\n\
         <p><a href=\"/review?language={}\">Back</a></p>\n",
        escape_html(language),
        escape_html(reason),
        escape_html(&encode_query(language))
    );
    page_shell(&body)
}

/// The one-shot session decision surface.
pub(crate) fn session_page(language: &str, form: &str, name: &str) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"meta\">Annotator: {}</p>\n",
        escape_html(form),
        escape_html(name)
    );

    body.push_str("<form method=\"get\" action=\"/review/session/resume\">\n");
    body.push_str(&hidden_field("language", language));
    body.push_str(&hidden_field("form", form));
    body.push_str(&hidden_field("name", name));
    body.push_str("<p><button type=\"submit\">Continue previous session</button></p>\n</form>\n");

    body.push_str(&start_new_form(language, form, name));
    page_shell(&body)
}

/// Candidate list for resuming, or guidance when there is none.
pub(crate) fn resume_page(
    language: &str,
    form: &str,
    name: &str,
    candidates: &[SessionId],
) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"meta\">Annotator: {}</p>\n",
        escape_html(form),
        escape_html(name)
    );

    if candidates.is_empty() {
        body.push_str(
            "<p class=\"notice\">No sessions found. Start a new session to begin.</p>\n",
        );
    } else {
        body.push_str("<p>Select a session to resume:</p>\n<ul>\n");
        for candidate in candidates {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape_html(&page_url(language, form, name, candidate.as_str(), 1)),
                escape_html(candidate.as_str())
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str(&start_new_form(language, form, name));
    page_shell(&body)
}

fn start_new_form(language: &str, form: &str, name: &str) -> String {
    let mut fragment = String::from("<form method=\"post\" action=\"/review/session/new\">\n");
    fragment.push_str(&hidden_field("language", language));
    fragment.push_str(&hidden_field("form", form));
    fragment.push_str(&hidden_field("name", name));
    fragment.push_str("<p><button type=\"submit\">Start new session</button></p>\n</form>\n");
    fragment
}

/// One page of review items, each with its own save form.
pub(crate) fn review_page(
    language: &str,
    form: &str,
    name: &str,
    session: &str,
    view: &PageView,
    notice: Option<&PageNotice>,
) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"meta\">Annotator: {} | Session: {}</p>\n",
        escape_html(form),
        escape_html(name),
        escape_html(session)
    );

    match notice {
        Some(PageNotice::Saved { title }) => {
            body.push_str(&format!(
                "<p class=\"notice saved\">Saved {}.</p>\n",
                escape_html(title)
            ));
        }
        Some(PageNotice::Failed { reason }) => {
            body.push_str(&format!(
                "<p class=\"notice error\">Save failed: {}</p>\n",
                escape_html(reason)
            ));
        }
        None => {}
    }

    if view.page_count == 0 {
        body.push_str("<p class=\"notice\">No audio files found.</p>\n");
    } else if view.items.is_empty() {
        body.push_str("<p class=\"notice\">Nothing on this page.</p>\n");
        body.push_str(&page_nav(language, form, name, session, view));
    } else {
        body.push_str(&page_nav(language, form, name, session, view));
        for item in &view.items {
            body.push_str("<section class=\"item\">\n");
            body.push_str(&format!(
                "<h3>{}. {}</h3>\n",
                item.number,
                escape_html(&item.title)
            ));

            match &item.audio_url {
                Some(url) => body.push_str(&format!(
                    "<p><audio controls src=\"{}\"></audio></p>\n",
                    escape_html(url)
                )),
                None => body.push_str("<p class=\"muted\">No audio link available.</p>\n"),
            }

            match &item.original_transcript {
                Some(text) => body.push_str(&format!(
                    "<p class=\"transcript\">{}</p>\n",
                    escape_html(text)
                )),
                None => body.push_str("<p class=\"muted\">No machine transcript.</p>\n"),
            }

            body.push_str("<form method=\"post\" action=\"/review/save\">\n");
            body.push_str(&hidden_field("language", language));
            body.push_str(&hidden_field("form", form));
            body.push_str(&hidden_field("name", name));
            body.push_str(&hidden_field("session", session));
            body.push_str(&hidden_field("page", &view.page.to_string()));
            body.push_str(&hidden_field("key", &item.key));
            body.push_str(&format!(
                "<p><textarea name=\"corrected\" rows=\"4\">{}</textarea></p>\n",
                escape_html(&item.corrected_text)
            ));
            body.push_str("<p><button type=\"submit\">Save</button></p>\n</form>\n</section>\n");
        }
        body.push_str(&page_nav(language, form, name, session, view));
    }

    page_shell(&body)
}

fn page_nav(language: &str, form: &str, name: &str, session: &str, view: &PageView) -> String {
    let mut nav = String::from("<nav>\n");

    if view.page > 1 && view.page <= view.page_count {
        nav.push_str(&format!(
            "<a href=\"{}\">Previous</a>\n",
            escape_html(&page_url(language, form, name, session, view.page - 1))
        ));
    }
    if view.page < view.page_count {
        nav.push_str(&format!(
            "<a href=\"{}\">Next</a>\n",
            escape_html(&page_url(language, form, name, session, view.page + 1))
        ));
    }

    nav.push_str("<form method=\"get\" action=\"/review/page\">\n");
    nav.push_str(&hidden_field("language", language));
    nav.push_str(&hidden_field("form", form));
    nav.push_str(&hidden_field("name", name));
    nav.push_str(&hidden_field("session", session));
    nav.push_str(&format!(
        "<label>Page <input type=\"number\" name=\"page\" value=\"{}\" min=\"1\" max=\"{}\"></label>\n",
        view.page, view.page_count
    ));
    nav.push_str("<button type=\"submit\">Go</button>\n</form>\n");
    nav.push_str(&format!(
        "<span class=\"meta\">Page {} of {}</span>\n</nav>\n",
        view.page, view.page_count
    ));
    nav
}

/// Fallback page for unexpected server-side failures.
pub(crate) fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p class=\"notice error\">{}</p>\n\
         <p><a href=\"/\">Back to languages</a></p>\n",
        escape_html(message)
    );
    page_shell(&body)
}
