// Log table templates - slow operations table and the filterable legacy table
use crate::domain::highlight::{highlight, Marker, HTML_MARK};
use crate::domain::log_record::{LogRecord, Severity};
use crate::infrastructure::http_response::escape_html;

const OPEN_SENTINEL: &str = "\u{E000}";
const CLOSE_SENTINEL: &str = "\u{E001}";
const OPEN_CHAR: char = '\u{E000}';
const CLOSE_CHAR: char = '\u{E001}';
const SENTINEL_CHARS: [char; 2] = [OPEN_CHAR, CLOSE_CHAR];
/// Replaces literal sentinel code points while highlighting runs.
const STAND_IN: char = '\u{E002}';
const SENTINELS: Marker = Marker {
    open: OPEN_SENTINEL,
    close: CLOSE_SENTINEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTemplate {
    SlowOps,
    Legacy,
}

impl TableTemplate {
    /// `slowops` selects the slow operations table, anything else the legacy one.
    pub fn select(mode: &str) -> Self {
        if mode == "slowops" {
            TableTemplate::SlowOps
        } else {
            TableTemplate::Legacy
        }
    }

    pub fn render(&self, ctx: &LogTableContext<'_>) -> String {
        let body = match self {
            TableTemplate::SlowOps => slow_ops_table(ctx),
            TableTemplate::Legacy => legacy_table(ctx),
        };
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{hatchet} - logs</title>
    <style>mark {{ background-color: #ffeb3b; }}</style>
</head>
<body>
{body}</body></html>
"#,
            hatchet = escape_html(ctx.hatchet),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogTableContext<'a> {
    pub hatchet: &'a str,
    pub logs: &'a [LogRecord],
    pub summary: &'a str,
    pub component: &'a str,
    pub severity: &'a str,
    pub context: &'a str,
    /// Row number of the first record on this page
    pub seq: usize,
    pub has_more: bool,
    pub next_url: &'a str,
    pub components: &'a [String],
}

/// Highlight a raw message, then escape everything outside the markers.
///
/// Literal sentinel code points in the message come out as character
/// references; every other character is kept.
pub fn highlight_message(message: &str, extra_terms: &[&str]) -> String {
    let terms: Vec<String> = extra_terms.iter().map(|term| mask_sentinels(term)).collect();
    let marked = highlight(&mask_sentinels(message), &terms, SENTINELS);

    let mut original = message.chars();
    let mut html = String::with_capacity(marked.len());
    let mut buf = [0u8; 4];
    for c in marked.chars() {
        match c {
            OPEN_CHAR => html.push_str(HTML_MARK.open),
            CLOSE_CHAR => html.push_str(HTML_MARK.close),
            _ => {
                // highlighting only inserts markers, so the rest lines up with the message
                let raw = original.next().unwrap_or(c);
                if SENTINEL_CHARS.contains(&raw) {
                    html.push_str(&format!("&#x{:X};", u32::from(raw)));
                } else {
                    html.push_str(&escape_html(raw.encode_utf8(&mut buf)));
                }
            }
        }
    }
    html
}

fn mask_sentinels(text: &str) -> String {
    text.chars()
        .map(|c| if SENTINEL_CHARS.contains(&c) { STAND_IN } else { c })
        .collect()
}

pub fn component_options(components: &[String], selected: &str) -> String {
    components
        .iter()
        .map(|c| {
            let c = escape_html(c);
            let flag = if c == escape_html(selected) { "SELECTED" } else { "" };
            format!("<option value='{c}' {flag}>{c}</option>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn severity_options(selected: &str) -> String {
    Severity::ALL
        .iter()
        .map(|s| {
            let flag = if s.code() == selected { "SELECTED" } else { "" };
            format!("<option value='{}' {}>{}</option>", s.code(), flag, s.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const TABLE_HEADER: &str = r#"		<tr>
			<th>#</th>
			<th>date</th>
			<th>S</th>
			<th>component</th>
			<th>context</th>
			<th>message</th>
		</tr>
"#;

fn table_row(n: usize, record: &LogRecord, extra_terms: &[&str]) -> String {
    format!(
        r#"		<tr>
			<td align='right'>{n}</td>
			<td>{}</td>
			<td>{}</td>
			<td>{}</td>
			<td>{}</td>
			<td>{}</td>
		</tr>
"#,
        escape_html(&record.timestamp),
        record.severity,
        escape_html(&record.component),
        escape_html(&record.context),
        highlight_message(&record.message, extra_terms),
    )
}

fn slow_ops_table(ctx: &LogTableContext<'_>) -> String {
    let rows: String = ctx
        .logs
        .iter()
        .enumerate()
        .map(|(n, record)| table_row(n + 1, record, &[]))
        .collect();

    format!(
        r#"<p/>
<div align='center'>
	<table width='100%'>
{TABLE_HEADER}{rows}	</table>
	<div align='center'><hr/><p/>{}</div>
</div>
"#,
        escape_html(ctx.summary)
    )
}

fn next_button(ctx: &LogTableContext<'_>) -> String {
    if !ctx.has_more {
        return String::new();
    }
    format!(
        r#"	<button onClick="javascript:location.href='{}'; return false;" class="btn" style="float: right;">next</button>
"#,
        escape_html(ctx.next_url)
    )
}

fn legacy_table(ctx: &LogTableContext<'_>) -> String {
    let filters = format!(
        r#"<br/>
<div style="float: left;">
	<select id='component'>
		<option value=''>select a component</option>
		{components}
	</select>
</div>
<div style="float: left; padding: 0px 0px 0px 20px;">
	<select id='severity'>
		<option value=''>select a severity</option>
		{severities}
	</select>
</div>
<div style="float: left; padding: 0px 0px 0px 20px;">
	<input id='context' type='text' value='{context}' size='30'/>
	<button id="find" onClick="findLogs()" class="button">Find</button>
</div>
"#,
        components = component_options(ctx.components, ctx.component),
        severities = severity_options(ctx.severity),
        context = escape_html(ctx.context),
    );

    let mut table = String::new();
    if !ctx.logs.is_empty() {
        let terms = [ctx.context];
        let rows: String = ctx
            .logs
            .iter()
            .enumerate()
            .map(|(n, record)| table_row(n + ctx.seq, record, &terms))
            .collect();
        let button = next_button(ctx);
        table = format!(
            r#"{button}	<table width='100%'>
{TABLE_HEADER}{rows}	</table>
{button}<div align='center'><hr/><p/>{}</div>
"#,
            escape_html(ctx.summary)
        );
    }

    format!(
        r#"{filters}
<p/>
<div>
{table}</div>
<script>
	document.getElementById("context").addEventListener("keypress", function(event) {{
		if (event.key === "Enter") {{
			event.preventDefault();
			document.getElementById("find").click();
		}}
	}});

	function findLogs() {{
		var sel = document.getElementById('component');
		var component = sel.options[sel.selectedIndex].value;
		sel = document.getElementById('severity');
		var severity = sel.options[sel.selectedIndex].value;
		var context = encodeURIComponent(document.getElementById('context').value);
		window.location.href = '/hatchets/{hatchet}/logs?component=' + component + '&severity=' + severity + '&context=' + context;
	}}
</script>
"#,
        hatchet = urlencoding::encode(ctx.hatchet),
    )
}
