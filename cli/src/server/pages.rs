//! Server-rendered HTML. Templates carry a single `{{BODY}}`-style slot each so
//! the embedded CSS and script need no brace escaping.

const STYLE: &str = r#"
  body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 30px 20px;
         display: flex; flex-direction: column; align-items: center; color: #1e2d3d;
         background: linear-gradient(135deg, #e0f0ff, #ffffff); min-height: 100vh; }
  h1 { font-size: 2.6rem; color: #2f80ed; }
  a.nav-btn, button { background: linear-gradient(135deg, #56ccf2, #2f80ed); color: white; border: none;
         padding: 12px 24px; border-radius: 24px; font-weight: 600; cursor: pointer; text-decoration: none; }
  button.delete-btn { background: linear-gradient(135deg, #f44336, #d32f2f); }
  .cidr-buttons { display: flex; flex-wrap: wrap; justify-content: center; gap: 16px; margin: 30px 0; }
  #result, table.cidrs { background: white; max-width: 700px; width: 100%; border-radius: 20px;
         padding: 20px 30px; box-shadow: 0 12px 28px rgba(0,0,0,0.12); text-align: left; }
  td, th { padding: 10px 16px; text-align: left; }
  input[type="text"] { padding: 12px 16px; width: 260px; border: 2px solid #4facfe; border-radius: 24px; }
  form.add-form { margin: 30px 0; }
  .error { color: #e74c3c; }
"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Network Scanner</title>
<style>{{STYLE}}</style>
</head>
<body>
  <h1>Network Scanner</h1>
  <a href="/manage" class="nav-btn">Manage Networks</a>
  <div class="cidr-buttons">{{BUTTONS}}</div>
  <div id="result"></div>
<script>
  function escapeHtml(text) {
    const div = document.createElement("div");
    div.textContent = text;
    return div.innerHTML;
  }

  function scanNetwork(cidr) {
    const resultDiv = document.getElementById("result");
    resultDiv.innerHTML = "<b>Scanning " + escapeHtml(cidr) + " ...</b>";
    fetch("/scan/" + encodeURIComponent(cidr))
      .then(response => {
        if (!response.ok) { throw new Error(response.status); }
        return response.json();
      })
      .then(data => {
        let html = `<h3>Alive IPs in ${escapeHtml(data.subnet)} (${data.count})</h3>`;
        html += `<p>Scan initiated at: ${data.scan_time}</p>`;
        if (data.ips.length > 0) {
          html += "<table><thead><tr><th>IP Address</th></tr></thead><tbody>";
          data.ips.forEach(ip => { html += "<tr><td>" + ip + "</td></tr>"; });
          html += "</tbody></table>";
        } else {
          html += "<p>No alive IPs found.</p>";
        }
        resultDiv.innerHTML = html;
      })
      .catch(() => {
        resultDiv.innerHTML = "<p class='error'>Error scanning the network.</p>";
      });
  }

  document.querySelectorAll("button.cidr-btn").forEach(btn => {
    btn.addEventListener("click", () => scanNetwork(btn.dataset.cidr));
  });
</script>
</body>
</html>
"#;

const MANAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Manage Networks</title>
<style>{{STYLE}}</style>
</head>
<body>
  <h1>Manage Networks</h1>
  <a href="/" class="nav-btn">Back to Scanner</a>
  <form method="POST" action="/manage" class="add-form">
    <input type="text" name="cidr" placeholder="e.g. 172.20.215.0/24" required autocomplete="off" />
    <button type="submit" name="action" value="add">Add CIDR</button>
  </form>
  <table class="cidrs">
    <thead><tr><th>CIDR</th><th>Actions</th></tr></thead>
    <tbody>{{ROWS}}</tbody>
  </table>
</body>
</html>
"#;

pub fn index(cidrs: &[String]) -> String {
    let buttons: String = cidrs
        .iter()
        .map(|cidr| {
            let cidr = escape_html(cidr);
            format!(r#"<button class="cidr-btn" data-cidr="{cidr}">{cidr}</button>"#)
        })
        .collect();

    INDEX_TEMPLATE
        .replace("{{STYLE}}", STYLE)
        .replace("{{BUTTONS}}", &buttons)
}

pub fn manage(cidrs: &[String]) -> String {
    let rows: String = cidrs
        .iter()
        .map(|cidr| {
            let cidr = escape_html(cidr);
            format!(
                r#"<tr><td>{cidr}</td><td><form method="POST" action="/manage"><input type="hidden" name="cidr" value="{cidr}"><button type="submit" name="action" value="delete" class="delete-btn">Delete</button></form></td></tr>"#
            )
        })
        .collect();

    MANAGE_TEMPLATE
        .replace("{{STYLE}}", STYLE)
        .replace("{{ROWS}}", &rows)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_networks() {
        let page = index(&["192.168.1.0/24".to_string(), "10.0.0.0/8".to_string()]);
        assert!(page.contains("Network Scanner"));
        assert!(page.contains("Manage Networks"));
        assert!(page.contains(r#"data-cidr="192.168.1.0/24""#));
        assert!(page.contains(r#"data-cidr="10.0.0.0/8""#));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn manage_has_delete_row_per_network() {
        let page = manage(&["10.0.0.0/8".to_string()]);
        assert_eq!(page.matches(r#"value="delete""#).count(), 1);
        assert!(page.contains(r#"name="cidr" value="10.0.0.0/8""#));
    }

    #[test]
    fn markup_in_registry_is_escaped() {
        let page = index(&["<script>alert(1)</script>".to_string()]);
        assert!(!page.contains("<script>alert(1)"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
