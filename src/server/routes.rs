use crate::error::CalcError;
use crate::server::api::{self, ApiError};
use crate::server::static_files;
use crate::server::AppState;

pub struct HttpResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

pub fn route_request(state: &AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    if let Some(response) = static_files::try_serve_static(&state.config, method, path) {
        return response;
    }
    let (route, query) = path.split_once('?').unwrap_or((path, ""));
    match (method, route) {
        ("GET", "/") | ("GET", "/index.html") => HttpResponse {
            status_code: 200,
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => json_result(api::health_payload()),
        ("GET", "/api/characters") => json_result(api::characters_payload(&state.catalog)),
        ("GET", "/api/eligible") => match query_param(query, "character") {
            Some(character) => api_result(api::eligible_payload(&state.catalog, &character)),
            None => error_response(400, "missing 'character' query parameter"),
        },
        ("POST", "/api/calculate") => api_result(api::calculate_payload(&state.catalog, body)),
        ("GET", "/api/builds") => json_result(api::builds_payload(&state.ledger())),
        ("POST", "/api/builds") => {
            let mut ledger = state.ledger();
            api_result(api::save_build_payload(&state.catalog, &mut ledger, body))
        }
        ("DELETE", route) if route.starts_with("/api/builds/") => {
            let raw_index = route.trim_start_matches("/api/builds/");
            let mut ledger = state.ledger();
            api_result(api::delete_build_payload(&mut ledger, raw_index))
        }
        _ => error_response(404, "Route not found"),
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.trim().is_empty())
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        content_type: "application/json",
        body,
    }
}

fn json_result(result: Result<String, serde_json::Error>) -> HttpResponse {
    match result {
        Ok(payload) => ok_json(payload),
        Err(err) => error_response(500, &err.to_string()),
    }
}

fn api_result(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(payload) => ok_json(payload),
        Err(ApiError::Body(err)) => {
            error_response(400, &format!("Invalid request body: {err}"))
        }
        Err(ApiError::Validation(validation)) => match serde_json::to_string_pretty(&validation) {
            Ok(body) => HttpResponse {
                status_code: 400,
                content_type: "application/json",
                body,
            },
            Err(err) => error_response(500, &err.to_string()),
        },
        Err(ApiError::Calc(err)) if err.is_not_found() => {
            error_response(404, &err.to_string())
        }
        Err(ApiError::Calc(err @ CalcError::TooManyAbilities(_))) => {
            error_response(400, &err.to_string())
        }
        Err(err) => error_response(500, &err.to_string()),
    }
}

fn error_response(status_code: u16, message: &str) -> HttpResponse {
    let body = serde_json::json!({
        "status": "error",
        "message": message,
    })
    .to_string();
    HttpResponse {
        status_code,
        content_type: "application/json",
        body,
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Skill Calculator</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 2rem; background: #1d1f24; color: #e8e3d3; }
    select, button { margin: 0.2rem; padding: 0.3rem; }
    table { border-collapse: collapse; margin-top: 1rem; }
    td, th { border: 1px solid #555; padding: 0.25rem 0.6rem; text-align: center; }
    #portrait { height: 96px; vertical-align: middle; }
    #error { color: #e07a6a; }
  </style>
</head>
<body>
  <h1>Skill Calculator</h1>
  <div>
    <img id="portrait" alt="" />
    <select id="character"></select>
    <select id="class"></select>
  </div>
  <div id="abilities"></div>
  <table><thead><tr id="skill-head"></tr></thead><tbody><tr id="skill-ranks"></tr></tbody></table>
  <button id="save-btn">Save build</button>
  <p id="error"></p>
  <table id="builds"><thead><tr id="build-head"></tr></thead><tbody></tbody></table>
  <script>
    const SLOTS = 5;
    const characterEl = document.getElementById('character');
    const classEl = document.getElementById('class');
    const abilitiesEl = document.getElementById('abilities');
    const errorEl = document.getElementById('error');
    const abilityEls = [];
    for (let i = 0; i < SLOTS; i++) {
      const sel = document.createElement('select');
      sel.addEventListener('change', calculate);
      abilitiesEl.appendChild(sel);
      abilityEls.push(sel);
    }

    function fill(select, names) {
      select.innerHTML = '';
      names.forEach(name => {
        const opt = document.createElement('option');
        opt.value = name;
        opt.textContent = name;
        select.appendChild(opt);
      });
    }

    function selection() {
      return {
        character: characterEl.value,
        class: classEl.value,
        abilities: abilityEls.map(el => el.value),
      };
    }

    async function postJson(path, payload) {
      const response = await fetch(path, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
      const data = await response.json();
      if (!response.ok) throw new Error(data.message || ('HTTP ' + response.status));
      return data;
    }

    function renderRanks(table) {
      document.getElementById('skill-head').innerHTML = table.map(r => '<th>' + r.skill + '</th>').join('');
      document.getElementById('skill-ranks').innerHTML = table.map(r => '<td>' + r.rank + '</td>').join('');
    }

    async function calculate() {
      errorEl.textContent = '';
      try {
        const data = await postJson('/api/calculate', selection());
        renderRanks(data.table);
      } catch (e) { errorEl.textContent = e.message; }
    }

    async function changedCharacter() {
      const option = characterEl.selectedOptions[0];
      document.getElementById('portrait').src = option ? option.dataset.portrait : '';
      const response = await fetch('/api/eligible?character=' + encodeURIComponent(characterEl.value));
      const data = await response.json();
      fill(classEl, data.classes || []);
      abilityEls.forEach(el => fill(el, data.abilities || []));
      calculate();
    }

    async function refreshBuilds() {
      const data = await (await fetch('/api/builds')).json();
      const body = document.querySelector('#builds tbody');
      body.innerHTML = '';
      if (data.builds.length > 0) {
        const skills = Object.keys(data.builds[0].requirements);
        document.getElementById('build-head').innerHTML =
          ['character', 'class', 'abilities'].concat(skills).concat(['']).map(h => '<th>' + h + '</th>').join('');
      }
      data.builds.forEach((build, index) => {
        const row = document.createElement('tr');
        const ranks = Object.values(build.requirements).map(r => '<td>' + (r === 'e' ? '' : r.toUpperCase()) + '</td>').join('');
        row.innerHTML = '<td>' + build.character + '</td><td>' + build.class + '</td><td>' + build.abilities.join(', ') + '</td>' + ranks;
        const cell = document.createElement('td');
        const del = document.createElement('button');
        del.textContent = 'Delete';
        del.addEventListener('click', async () => {
          await fetch('/api/builds/' + index, { method: 'DELETE' });
          refreshBuilds();
        });
        cell.appendChild(del);
        row.appendChild(cell);
        body.appendChild(row);
      });
    }

    document.getElementById('save-btn').addEventListener('click', async () => {
      errorEl.textContent = '';
      try {
        await postJson('/api/builds', selection());
        refreshBuilds();
      } catch (e) { errorEl.textContent = e.message; }
    });
    characterEl.addEventListener('change', changedCharacter);
    classEl.addEventListener('change', calculate);

    fetch('/api/characters').then(r => r.json()).then(data => {
      characterEl.innerHTML = '';
      data.characters.forEach(c => {
        const opt = document.createElement('option');
        opt.value = c.name;
        opt.textContent = c.name;
        opt.dataset.portrait = c.portrait;
        characterEl.appendChild(opt);
      });
      changedCharacter();
      refreshBuilds();
    });
  </script>
</body>
</html>
"#
    .to_string()
}
