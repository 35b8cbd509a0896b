use shared::ReplayDetail;

/// Values the replay page template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayPage<'a> {
    pub root_url: &'a str,
    pub id: &'a str,
    pub format: &'a str,
    pub p1_id: String,
    pub p1_name: &'a str,
    pub p2_id: String,
    pub p2_name: &'a str,
    pub battle_log: &'a str,
}

impl<'a> ReplayPage<'a> {
    pub fn new(root_url: &'a str, replay: &'a ReplayDetail) -> Self {
        Self {
            root_url,
            id: &replay.id,
            format: &replay.format,
            p1_id: replay.p1_id(),
            p1_name: &replay.p1,
            p2_id: replay.p2_id(),
            p2_name: &replay.p2,
            battle_log: &replay.log,
        }
    }
}

pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The log goes inside a `<script type="text/plain">` block, where entities
/// are not decoded. Only the closing tag sequence has to be broken up.
fn script_safe(text: &str) -> String {
    text.replace("</", "<\\/")
}

/// Renders the standalone replay page. The battle itself is drawn by the
/// site's replay player script, which reads the embedded log.
pub fn render_replay_page(page: &ReplayPage) -> String {
    let root = html_escape(page.root_url);
    let title = html_escape(&format!(
        "{}: {} vs. {}",
        page.format, page.p1_name, page.p2_name
    ));

    format!(
        r#"<!DOCTYPE html>
<meta charset="utf-8" />
<!-- version 1 -->
<title>{title} - Replays</title>
<style>
html,body {{font-family:Verdana, sans-serif;font-size:10pt;margin:0;padding:0;}}
body {{padding:12px 0;}}
.battle-log {{font-family:Verdana, sans-serif;font-size:10pt;}}
.battle-log-inline {{border:1px solid #AAAAAA;background:#EEF2F5;color:black;max-width:640px;margin:0 auto 80px;padding-bottom:5px;}}
.battle-log .inner {{padding:4px 8px 0px 8px;}}
.battle-log .inner-preempt {{padding:0 8px 4px 8px;}}
.battle-log .inner-after {{margin-top:0.5em;}}
.subtle {{color:#3A4A66;}}
</style>
<div class="wrapper replay-wrapper" style="max-width:1180px;margin:0 auto">
<input type="hidden" name="replayid" value="{id}" />
<div class="battle"></div><div class="battle-log"></div><div class="replay-controls"></div><div class="replay-controls-2"></div>
<h1 style="font-weight:normal;text-align:center"><strong>{format}</strong><br /><a href="{root}/users/{p1_id}" class="subtle" target="_blank">{p1_name}</a> vs. <a href="{root}/users/{p2_id}" class="subtle" target="_blank">{p2_name}</a></h1>
<script type="text/plain" class="battle-log-data">{battle_log}</script>
</div>
<div class="battle-log battle-log-inline"><div class="inner">{battle_log_html}</div></div>
<script>
let daily = Math.floor(Date.now()/1000/60/60/24);document.write('<script src="{root}/js/replay-embed.js?version'+daily+'"></'+'script>');
</script>
"#,
        title = title,
        root = root,
        id = html_escape(page.id),
        format = html_escape(page.format),
        p1_id = html_escape(&page.p1_id),
        p1_name = html_escape(page.p1_name),
        p2_id = html_escape(&page.p2_id),
        p2_name = html_escape(page.p2_name),
        battle_log = script_safe(page.battle_log),
        battle_log_html = html_escape(page.battle_log).replace('\n', "<br />"),
    )
}
