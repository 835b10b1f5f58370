//! Dashboard handler — the single page of the explorer.
//!
//! The page is rendered with the initial selections filled in; from then on
//! the script drives it through `/api/session` and `/api/review/stream`.

use axum::{extract::State, response::Html};
use rxlens_explore::{ExplorerState, SelectorOptions};

use crate::state::SharedState;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const DASHBOARD_CSS: &str = r#"
    body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; margin: 0; background: #f6f7f9; color: #1d232b; }
    .page-header { padding: 1.25rem 2rem; background: #1d3557; color: #fff; }
    .page-title { margin: 0; font-size: 1.6rem; }
    .text-muted { color: #8a94a3; }
    .page-header .text-muted { color: #c9d3e0; margin: 0.25rem 0 0; }
    .main-content { padding: 1.5rem 2rem; }
    .selectors { display: flex; gap: 1.5rem; flex-wrap: wrap; margin-bottom: 1rem; }
    .selectors label { display: block; font-weight: 600; margin-bottom: 0.25rem; }
    .selectors select { min-width: 260px; padding: 0.4rem; }
    .charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); gap: 1rem; }
    .card { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.08); padding: 0.75rem; }
    .chart { height: 520px; }
    #review-panel { margin-top: 1rem; }
    #review-panel .block + .block { border-top: 1px solid #e3e7ec; margin-top: 0.75rem; padding-top: 0.75rem; }
    #review-panel p { margin: 0.35rem 0; }
    .empty { font-style: italic; }
"#;

const DASHBOARD_JS: &str = r#"
    let session = null;
    let source = null;
    const bound = {};

    async function fetchJson(url, options) {
        const resp = await fetch(url, options);
        if (!resp.ok) throw new Error(url + ': ' + resp.status);
        return resp.json();
    }

    async function start() {
        render(await fetchJson('/api/session'));
    }

    async function send(event) {
        render(await fetchJson('/api/session', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ state: session, event: event }),
        }));
    }

    function render(resp) {
        session = resp.state;
        fillSelect('condition-select', resp.view.condition_options, session.condition);
        fillSelect('drug-select', resp.view.drug_options, session.drug);
        drawChart('male-chart', 'Male', resp.view.projection.male);
        drawChart('female-chart', 'Female', resp.view.projection.female);
    }

    function fillSelect(id, opts, selected) {
        const el = document.getElementById(id);
        el.replaceChildren(...opts.options.map(value => {
            const opt = document.createElement('option');
            opt.value = value;
            opt.textContent = value;
            opt.selected = value === selected;
            return opt;
        }));
    }

    function drawChart(id, sex, series) {
        const pts = series.points;
        const trace = {
            type: 'scatter3d',
            mode: 'markers',
            x: pts.map(p => p.condition),
            y: pts.map(p => p.drug),
            z: pts.map(p => p.satisfaction),
            text: pts.map(p => p.reviews),
            hovertemplate: '%{text}<extra></extra>',
            marker: {
                size: series.marker_size,
                color: pts.map(p => p.satisfaction),
                colorscale: 'Viridis',
                showscale: true,
                colorbar: { title: { text: series.axes.color } },
            },
        };
        const layout = {
            title: { text: series.title },
            margin: { l: 0, r: 0, b: 0, t: 40 },
            scene: {
                xaxis: { title: { text: series.axes.x } },
                yaxis: { title: { text: series.axes.y } },
                zaxis: { title: { text: series.axes.z } },
            },
        };
        const el = document.getElementById(id);
        Plotly.react(el, [trace], layout);
        if (!bound[id]) {
            bound[id] = true;
            el.on('plotly_click', ev => {
                const p = ev.points[0];
                send({
                    type: 'point_clicked',
                    sex: sex,
                    point: { condition: p.x, drug: p.y, satisfaction: p.z },
                }).then(streamPanel);
            });
        }
    }

    function clickParam(click) {
        return click ? JSON.stringify({ condition: click.condition, drug: click.drug, satisfaction: click.satisfaction }) : '';
    }

    function streamPanel() {
        if (source) source.close();
        for (const sex of ['male', 'female']) {
            for (const part of ['review', 'condition', 'drug']) {
                document.getElementById(`panel-${sex}-${part}`).replaceChildren();
            }
        }
        const params = new URLSearchParams({
            male: clickParam(session.male_click),
            female: clickParam(session.female_click),
        });
        source = new EventSource('/api/review/stream?' + params);
        source.addEventListener('review', e => {
            const data = JSON.parse(e.data);
            renderFragments(`panel-${data.sex.toLowerCase()}-review`, data.fragments);
        });
        source.addEventListener('lookup', e => {
            const data = JSON.parse(e.data);
            renderFragments(`panel-${data.sex.toLowerCase()}-${data.kind}`, data.fragments);
        });
        source.addEventListener('done', () => source.close());
        source.onerror = () => source.close();
    }

    function renderFragments(id, fragments) {
        const el = document.getElementById(id);
        el.replaceChildren(...fragments.map(f => {
            if (f.type === 'link') {
                const a = document.createElement('a');
                a.href = f.href;
                a.target = '_blank';
                a.textContent = f.text;
                const p = document.createElement('p');
                p.appendChild(a);
                return p;
            }
            const p = document.createElement('p');
            p.textContent = f.text;
            return p;
        }));
    }

    document.getElementById('condition-select').addEventListener('change', e =>
        send({ type: 'condition_selected', condition: e.target.value }));
    document.getElementById('drug-select').addEventListener('change', e =>
        send({ type: 'drug_selected', drug: e.target.value }));

    start().catch(err => console.error(err));
"#;

pub async fn dashboard(State(state): State<SharedState>) -> Html<String> {
    let initial = ExplorerState::initial(&state.store);
    let view = initial.view(&state.store);

    Html(render_dashboard(
        state.store.len(),
        &view.condition_options,
        &view.drug_options,
        initial.condition.as_deref(),
        initial.drug.as_deref(),
    ))
}

/// Minimal HTML escaping for text and attribute values.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_options(opts: &SelectorOptions, selected: Option<&str>) -> String {
    opts.options
        .iter()
        .map(|raw| {
            let sel = if Some(raw.as_str()) == selected { " selected" } else { "" };
            let value = escape_html(raw);
            format!(r#"<option value="{}"{}>{}</option>"#, value, sel, value)
        })
        .collect()
}

fn render_dashboard(
    records: usize,
    conditions: &SelectorOptions,
    drugs: &SelectorOptions,
    condition: Option<&str>,
    drug: Option<&str>,
) -> String {
    let panel_blocks: String = ["male", "female"]
        .iter()
        .map(|sex| {
            format!(
                r#"<div class="block" id="panel-{sex}"><div id="panel-{sex}-review"></div><div id="panel-{sex}-condition"></div><div id="panel-{sex}-drug"></div></div>"#,
                sex = sex
            )
        })
        .collect();

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Drug Reviews Dashboard</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
<div class="page-header">
    <h1 class="page-title">Drug Reviews Dashboard</h1>
    <p class="text-muted">{} reviews across {} conditions</p>
</div>
<main class="main-content">
    <div class="selectors">
        <div>
            <label for="condition-select">Condition</label>
            <select id="condition-select">{}</select>
        </div>
        <div>
            <label for="drug-select">Drug</label>
            <select id="drug-select">{}</select>
        </div>
    </div>

    <div class="charts">
        <div class="card"><div id="male-chart" class="chart"></div></div>
        <div class="card"><div id="female-chart" class="chart"></div></div>
    </div>

    <div class="card" id="review-panel">
        <p class="text-muted empty">Click a point on either chart to see its review.</p>
        {}
    </div>
</main>
<script>{}</script>
</body>
</html>"#,
        PLOTLY_JS,
        DASHBOARD_CSS,
        records,
        conditions.options.len(),
        render_options(conditions, condition),
        render_options(drugs, drug),
        panel_blocks,
        DASHBOARD_JS,
    )
}
