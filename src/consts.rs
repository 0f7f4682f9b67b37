pub const WDIFF_PROGRAM: &str = "wdiff";

/// Use HTML tags instead of `wdiff`'s default `[-…-]` and `{+…+}` markers.
pub const WDIFF_OUTPUT_OPTIONS: [&str; 4] = [
    "--start-delete=<del>",
    "--end-delete=</del>",
    "--start-insert=<ins>",
    "--end-insert=</ins>",
];

/// Close and reopen markers around every line break so no `<ins>`/`<del>`
/// spans more than one line.
pub const WDIFF_LINEBREAK_OPTIONS: [&str; 1] = ["--avoid-wraps"];

/// `wdiff` exits with 1 when the files differ, which is the interesting case.
pub const WDIFF_SUCCESS_CODES: [i32; 2] = [0, 1];

pub const LINE_BREAK: &str = "<br />";

pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{org_file}} &rarr; {{new_file}}</title>
<style type="text/css">
{{css}}
</style>
</head>
<body>
<header>
<h1>{{org_file}} &rarr; {{new_file}}</h1>
{{#version}}<p class="version">Version: {{version}}</p>{{/version}}
{{#timestamp}}<p class="timestamp">Generated: {{timestamp}}</p>{{/timestamp}}
</header>
<article id="diff">
{{content}}
</article>
<script type="text/javascript">
{{js}}
</script>
</body>
</html>"#;

pub const DEFAULT_CSS: &str = "body {
  max-width: 50em;
  margin: 2em auto;
  padding: 0 1em;
  font-family: Georgia, serif;
  line-height: 1.5;
}
header {
  border-bottom: 1px solid #ccc;
}
header h1 {
  font-size: 1.4em;
}
.version,
.timestamp {
  color: #666;
  font-size: 0.9em;
}
ins {
  background-color: #dfd;
  text-decoration: none;
}
del {
  background-color: #fdd;
  color: #a33;
}
body.hide-deletions del {
  display: none;
}";

pub const DEFAULT_JS: &str = "document.addEventListener('keydown', function (event) {
  if (event.key === 'd') {
    document.body.classList.toggle('hide-deletions');
  }
});";
