use crate::dates::{date_key, week_start, SHORTCUT_DAYS};
use crate::models::UnitPreferences;
use chrono::NaiveDate;

pub fn render_index(today: NaiveDate, prefs: &UnitPreferences) -> String {
    let prefs_json = serde_json::to_string(prefs).unwrap_or_else(|_| "{}".to_string());
    let shortcuts = SHORTCUT_DAYS
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    INDEX_HTML
        .replace("{{TODAY}}", &date_key(today))
        .replace("{{PREFS}}", &prefs_json)
        .replace("{{WEEK_START}}", &date_key(week_start(today, prefs.calendar_week_start)))
        .replace("{{SHORTCUTS}}", &shortcuts)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness Log</title>
  <style>
    :root {
      --bg-1: #eef5ee;
      --ink: #23302a;
      --accent: #2f8f5b;
      --accent-dark: #1f6b42;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(31, 107, 66, 0.15);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #f8fbf6 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1, h2 {
      margin: 0;
    }

    section {
      display: grid;
      gap: 12px;
      padding-bottom: 20px;
      border-bottom: 1px solid rgba(35, 48, 42, 0.1);
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      align-items: center;
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 8px 16px;
      font-weight: 600;
      cursor: pointer;
      background: #e4e9e5;
      color: var(--ink);
    }

    button.active, button.primary {
      background: var(--accent);
      color: white;
    }

    input {
      border: 1px solid #c9d3cc;
      border-radius: 8px;
      padding: 8px;
    }

    ul {
      margin: 0;
      padding: 0;
      list-style: none;
      display: grid;
      gap: 6px;
    }

    li {
      display: flex;
      justify-content: space-between;
      padding: 10px 12px;
      border: 1px solid rgba(35, 48, 42, 0.1);
      border-radius: 10px;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.95rem;
      color: var(--accent-dark);
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .empty {
      color: #7a857e;
      font-style: italic;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Settings</h1>
    </header>

    <section>
      <h2>Measurement Units</h2>
      <div class="row" data-pref="weight">
        <span>Weight</span>
        <button type="button" data-value="kg">KG</button>
        <button type="button" data-value="lbs">LBS</button>
      </div>
      <div class="row" data-pref="height">
        <span>Height</span>
        <button type="button" data-value="cm">CM</button>
        <button type="button" data-value="ft/in">FT/IN</button>
      </div>
    </section>

    <section>
      <h2>Calendar Week Start</h2>
      <div class="row" data-pref="calendarWeekStart">
        <button type="button" data-value="sunday">Sunday</button>
        <button type="button" data-value="monday">Monday</button>
      </div>
    </section>

    <section>
      <h2>Log Exercise</h2>
      <div class="row">
        <input id="log-date" type="date" max="{{TODAY}}" value="{{TODAY}}" />
        <span id="shortcuts" class="row"></span>
      </div>
      <form id="entry-form" class="row">
        <input id="entry-name" placeholder="Exercise" required />
        <input id="entry-sets" type="number" min="1" value="3" required />
        <input id="entry-reps" type="number" min="1" value="10" required />
        <button class="primary" type="submit">Add</button>
        <button id="import-btn" type="button">Import from date</button>
      </form>
      <ul id="day-entries"></ul>
    </section>

    <section>
      <h2>Data Export</h2>
      <div class="row">
        <label>Start Date: <input id="start-date" type="date" /></label>
        <label>End Date: <input id="end-date" type="date" /></label>
        <button id="this-week-btn" type="button">This week</button>
        <button class="primary" id="copy-btn" type="button">Copy Selected Dates' Exercises</button>
      </div>
      <div class="status" id="status"></div>
    </section>

    <section>
      <h2>Saved Exercises</h2>
      <ul id="names"></ul>
    </section>
  </main>

  <script>
    let prefs = {{PREFS}};
    const today = '{{TODAY}}';
    const weekStart = '{{WEEK_START}}';
    const shortcutDays = [{{SHORTCUTS}}];
    const statusEl = document.getElementById('status');
    const logDateEl = document.getElementById('log-date');
    let statusTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      clearTimeout(statusTimer);
      statusTimer = setTimeout(() => {
        statusEl.textContent = '';
        statusEl.dataset.type = '';
      }, 3000);
    };

    const api = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const renderPrefs = () => {
      document.querySelectorAll('[data-pref]').forEach((row) => {
        row.querySelectorAll('button').forEach((button) => {
          button.classList.toggle('active', prefs[row.dataset.pref] === button.dataset.value);
        });
      });
    };

    document.querySelectorAll('[data-pref]').forEach((row) => {
      row.querySelectorAll('button').forEach((button) => {
        button.addEventListener('click', async () => {
          try {
            prefs = await api('PATCH', '/api/preferences', { [row.dataset.pref]: button.dataset.value });
            renderPrefs();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
      });
    });

    const loadNames = async () => {
      const { names } = await api('GET', '/api/exercises/names');
      const list = document.getElementById('names');
      list.innerHTML = '';
      if (!names.length) {
        list.innerHTML = '<li class="empty">No custom exercises saved yet.</li>';
        return;
      }
      names.forEach((name) => {
        const item = document.createElement('li');
        item.textContent = name;
        const actions = document.createElement('span');
        const edit = document.createElement('button');
        edit.textContent = 'Edit';
        edit.addEventListener('click', async () => {
          const to = prompt('Rename exercise', name);
          if (to === null || to === name) {
            return;
          }
          try {
            await api('POST', '/api/exercises/rename', { from: name, to });
            await refresh();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
        const del = document.createElement('button');
        del.textContent = 'Delete';
        del.addEventListener('click', async () => {
          if (!confirm(`Delete every "${name}" entry?`)) {
            return;
          }
          try {
            await api('POST', '/api/exercises/delete', { name });
            await refresh();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
        actions.append(edit, del);
        item.append(actions);
        list.append(item);
      });
    };

    const loadDay = async () => {
      const day = await api('GET', `/api/exercises/${logDateEl.value}`);
      const list = document.getElementById('day-entries');
      list.innerHTML = '';
      day.entries.forEach((entry) => {
        const item = document.createElement('li');
        item.textContent = `${entry.name} ${entry.sets}x${entry.reps}`;
        const del = document.createElement('button');
        del.textContent = 'Remove';
        del.addEventListener('click', async () => {
          try {
            await api('DELETE', `/api/exercises/${day.date}/${entry.id}`);
            await refresh();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
        item.append(del);
        list.append(item);
      });
    };

    const refresh = () => Promise.all([loadNames(), loadDay()]);

    let selectedDate = logDateEl.value;
    const changeDate = (date) => {
      selectedDate = date;
      logDateEl.value = date;
      loadDay().catch((err) => setStatus(err.message, 'error'));
    };

    const daysAgo = (days) => {
      const date = new Date(`${today}T00:00:00`);
      date.setDate(date.getDate() - days);
      const pad = (n) => String(n).padStart(2, '0');
      return `${date.getFullYear()}-${pad(date.getMonth() + 1)}-${pad(date.getDate())}`;
    };

    const shortcutsEl = document.getElementById('shortcuts');
    shortcutDays.forEach((days) => {
      const button = document.createElement('button');
      button.type = 'button';
      button.textContent = days === 1 ? 'Yesterday' : `${days} days ago`;
      button.addEventListener('click', () => changeDate(daysAgo(days)));
      shortcutsEl.append(button);
    });

    // A cleared pick means today; picks after `max` are refused outright.
    logDateEl.addEventListener('change', () => {
      const picked = logDateEl.value || today;
      if (picked > logDateEl.max) {
        logDateEl.value = selectedDate;
        setStatus(`Pick a date on or before ${logDateEl.max}.`, 'error');
        return;
      }
      changeDate(picked);
    });

    document.getElementById('entry-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        await api('POST', `/api/exercises/${logDateEl.value}`, {
          name: document.getElementById('entry-name').value,
          sets: Number(document.getElementById('entry-sets').value),
          reps: Number(document.getElementById('entry-reps').value)
        });
        await refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('import-btn').addEventListener('click', async () => {
      const from = prompt('Import exercises from date (YYYY-MM-DD, blank for yesterday)', '');
      if (from === null) {
        return;
      }
      try {
        const body = from.trim() ? { from: from.trim() } : {};
        const copied = await api('POST', `/api/exercises/${logDateEl.value}/import`, body);
        setStatus(`Imported ${copied.length} exercises.`, 'ok');
        await refresh();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('this-week-btn').addEventListener('click', () => {
      document.getElementById('start-date').value = weekStart;
      document.getElementById('end-date').value = today;
    });

    document.getElementById('copy-btn').addEventListener('click', async () => {
      const start = document.getElementById('start-date').value;
      const end = document.getElementById('end-date').value;
      if (!start || !end) {
        setStatus('Please select both start and end dates.', 'error');
        return;
      }
      try {
        const data = await api('GET', `/api/export?start=${start}&end=${end}`);
        await navigator.clipboard.writeText(data.text);
        setStatus('Copied to clipboard!', 'ok');
      } catch (err) {
        console.error('Failed to copy:', err);
        setStatus('Failed to copy data.', 'error');
      }
    });

    renderPrefs();
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
