//! HTML for the generator form.

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// What the form shows besides the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    None,
    Warning(&'a str),
    Error(&'a str),
}

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:1rem;font-weight:bold}\
input,textarea{width:100%;box-sizing:border-box;padding:.5rem;font-size:1rem}\
textarea{height:14rem}\
button{margin-top:1rem;padding:.6rem 1.2rem;font-size:1rem}\
.warning{background:#fff4ce;padding:.75rem;border-radius:4px}\
.error{background:#fde7e9;padding:.75rem;border-radius:4px}\
.info{background:#e8f1fb;padding:.75rem;border-radius:4px;margin-top:2rem}";

/// Render the form, prefilled with `title` and `content`.
pub fn render_form(notice: Notice<'_>, title: &str, content: &str) -> String {
    let notice_html = match notice {
        Notice::None => String::new(),
        Notice::Warning(message) => format!(r#"<p class="warning">{}</p>"#, escape_html(message)),
        Notice::Error(message) => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Slide Generator</title>
<style>{style}</style>
</head>
<body>
<h1>Slide Generator for School Assignments</h1>
<p>Type the title and the content. The app does the rest: a complete deck with pictures!</p>
{notice}
<form method="post" action="/generate">
<label for="title">Assignment title:</label>
<input id="title" name="title" type="text" placeholder="e.g. The Impact of the Environment" value="{title}">
<label for="content">Content (write paragraphs separated by Enter):</label>
<textarea id="content" name="content" placeholder="e.g. Introduction: the environment matters...&#10;&#10;Body: let's talk about recycling...&#10;&#10;Conclusion: we must act now!">{content}</textarea>
<button type="submit">Generate Slides</button>
</form>
<p class="info">Tip: write the content as normal text. Each paragraph becomes its own slide. Pictures come from free public sources.</p>
</body>
</html>
"#,
        style = STYLE,
        notice = notice_html,
        title = escape_html(title),
        content = escape_html(content),
    )
}
