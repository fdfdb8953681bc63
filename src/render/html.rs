use crate::model::FlowData;

/// Render a self-contained HTML report (data embedded as JSON).
///
/// Important: we avoid `format!()` because the HTML contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_report(data: &FlowData) -> anyhow::Result<String> {
    let json = serde_json::to_string(data)?; // embedded as JS object literal

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Alluvial Report</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; display: flex; align-items: baseline; gap: 24px; flex-wrap: wrap; }
  h1 { font-size: 18px; margin: 0; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }

  .main { height: calc(100vh - 58px); padding: 12px; box-sizing: border-box; }
  svg { width: 100%; height: 100%; }

  .ribbon { fill: none; opacity: 0.45; }
  .ribbon:hover { opacity: 0.8; }
  .node { stroke: black; stroke-width: 0.5; }
  .node-label { font-size: 12px; fill: #333; }
  .empty { color: #777; padding: 24px; font-size: 14px; }
</style>
</head>
<body>
<header>
  <h1 id="title"></h1>
  <div class="summary" id="summary"></div>
</header>

<div class="main">
  <svg id="diagram" preserveAspectRatio="xMidYMid meet"></svg>
</div>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

const SVG_NS = "http://www.w3.org/2000/svg";

// Ribbon palette cycled by link position; node boxes are uniform.
const PALETTE = [
  "#8dd3c7", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
  "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5"
];
const NODE_COLOR = "#4477aa";
const NODE_W = 20;    // node box thickness
const NODE_PAD = 15;  // vertical gap between node boxes in a column
const LABEL_GUTTER = 150;

function renderSummary() {
  const t = DATA.totals;
  const el = document.getElementById("summary");
  el.innerHTML = `
    <span class="pill">records: <b>${t.records}</b></span>
    <span class="pill">nodes: <b>${t.nodes}</b></span>
    <span class="pill">links: <b>${t.links}</b></span>
    <span class="pill">passes: <b>${t.passes}</b></span>
  `;
}

// Longest-path layering: a node's column is the deepest position any link
// chain can push it to. Node height encodes throughput (max of in/out sums).
function layout(width, height) {
  const n = DATA.labels.length;
  const depth = new Array(n).fill(0);
  for (let iter = 0; iter < n; iter++) {
    let changed = false;
    for (const l of DATA.links) {
      const d = depth[l.source] + 1;
      if (d < n && depth[l.target] < d) {
        depth[l.target] = d;
        changed = true;
      }
    }
    if (!changed) break;
  }

  const tin = new Array(n).fill(0);
  const tout = new Array(n).fill(0);
  for (const l of DATA.links) {
    tout[l.source] += l.value;
    tin[l.target] += l.value;
  }
  const size = depth.map((_, i) => Math.max(tin[i], tout[i], 1));

  const maxDepth = n ? Math.max(...depth) : 0;
  const columns = [];
  for (let d = 0; d <= maxDepth; d++) columns.push([]);
  for (let i = 0; i < n; i++) columns[depth[i]].push(i);

  // One value scale across all columns so ribbon widths stay comparable.
  let scale = Infinity;
  for (const col of columns) {
    const total = col.reduce((acc, i) => acc + size[i], 0);
    const avail = height - NODE_PAD * (col.length + 1);
    if (total > 0 && avail > 0) scale = Math.min(scale, avail / total);
  }
  if (!isFinite(scale)) scale = 1;

  const xStep = maxDepth > 0 ? (width - NODE_W - LABEL_GUTTER - 40) / maxDepth : 0;
  const nodes = new Array(n);
  columns.forEach((col, d) => {
    let y = NODE_PAD;
    for (const i of col) {
      const h = size[i] * scale;
      nodes[i] = { x: 20 + d * xStep, y: y, h: h, depth: d };
      y += h + NODE_PAD;
    }
  });

  return { nodes: nodes, scale: scale, maxDepth: maxDepth };
}

function render() {
  const svg = document.getElementById("diagram");
  const width = svg.clientWidth || 960;
  const height = svg.clientHeight || 600;
  svg.setAttribute("viewBox", `0 0 ${width} ${height}`);
  svg.innerHTML = "";

  if (!DATA.labels.length) {
    const text = document.createElementNS(SVG_NS, "text");
    text.setAttribute("x", 24);
    text.setAttribute("y", 32);
    text.setAttribute("class", "node-label");
    text.textContent = "no records";
    svg.appendChild(text);
    return;
  }

  const { nodes, scale, maxDepth } = layout(width, height);

  // Ribbons first so node boxes draw on top. Per-node running offsets keep
  // ribbons stacked in link order on both sides.
  const sOff = nodes.map(() => 0);
  const tOff = nodes.map(() => 0);

  DATA.links.forEach((l, idx) => {
    const s = nodes[l.source];
    const t = nodes[l.target];
    const w = Math.max(l.value * scale, 1);
    const y0 = s.y + sOff[l.source] + w / 2;
    const y1 = t.y + tOff[l.target] + w / 2;
    sOff[l.source] += w;
    tOff[l.target] += w;

    const x0 = s.x + NODE_W;
    const x1 = t.x;
    const mx = (x0 + x1) / 2;

    const path = document.createElementNS(SVG_NS, "path");
    path.setAttribute("d", `M ${x0} ${y0} C ${mx} ${y0}, ${mx} ${y1}, ${x1} ${y1}`);
    path.setAttribute("class", "ribbon");
    path.setAttribute("stroke", PALETTE[idx % PALETTE.length]);
    path.setAttribute("stroke-width", w);

    const tip = document.createElementNS(SVG_NS, "title");
    tip.textContent = `${DATA.labels[l.source]} → ${DATA.labels[l.target]}: ${l.value}`;
    path.appendChild(tip);
    svg.appendChild(path);
  });

  nodes.forEach((nd, i) => {
    const rect = document.createElementNS(SVG_NS, "rect");
    rect.setAttribute("x", nd.x);
    rect.setAttribute("y", nd.y);
    rect.setAttribute("width", NODE_W);
    rect.setAttribute("height", nd.h);
    rect.setAttribute("class", "node");
    rect.setAttribute("fill", NODE_COLOR);

    const tip = document.createElementNS(SVG_NS, "title");
    tip.textContent = DATA.labels[i];
    rect.appendChild(tip);
    svg.appendChild(rect);

    const text = document.createElementNS(SVG_NS, "text");
    text.setAttribute("class", "node-label");
    text.setAttribute("y", nd.y + nd.h / 2 + 4);
    if (nd.depth === maxDepth) {
      text.setAttribute("x", nd.x - 6);
      text.setAttribute("text-anchor", "end");
    } else {
      text.setAttribute("x", nd.x + NODE_W + 6);
    }
    text.textContent = DATA.labels[i];
    svg.appendChild(text);
  });
}

document.getElementById("title").textContent = DATA.title;
document.title = DATA.title;
renderSummary();
render();
window.addEventListener("resize", render);
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FlowLink, TotalsView};

    fn sample() -> FlowData {
        FlowData {
            title: "Titanic Survival Alluvial Diagram".to_string(),
            labels: vec!["Pclass1".to_string(), "male".to_string()],
            links: vec![FlowLink {
                source: 0,
                target: 1,
                value: 7,
            }],
            totals: TotalsView {
                records: 7,
                nodes: 2,
                links: 1,
                passes: 1,
            },
        }
    }

    #[test]
    fn report_embeds_the_data_payload() {
        let html = render_html_report(&sample()).unwrap();
        assert!(html.contains(r#""labels":["Pclass1","male"]"#));
        assert!(html.contains(r#""source":0,"target":1,"value":7"#));
        assert!(html.contains("Titanic Survival Alluvial Diagram"));
        assert!(!html.contains("__DATA__"));
    }
}
