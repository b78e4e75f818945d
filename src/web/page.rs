pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>eCourts Scraper</title>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    min-height: 100vh;
    padding: 20px;
  }
  .container {
    max-width: 800px;
    margin: 0 auto;
    background: white;
    border-radius: 16px;
    box-shadow: 0 20px 60px rgba(0,0,0,0.3);
    padding: 40px;
  }
  h1 { color: #2d3748; margin-bottom: 10px; font-size: 32px; }
  .subtitle { color: #718096; margin-bottom: 30px; }
  .form-group { margin-bottom: 20px; }
  label { display: block; color: #4a5568; font-weight: 600; margin-bottom: 8px; }
  input, select {
    width: 100%;
    padding: 12px;
    border: 2px solid #e2e8f0;
    border-radius: 8px;
    font-size: 16px;
  }
  input:focus, select:focus { outline: none; border-color: #667eea; }
  .tabs { display: flex; gap: 10px; margin-bottom: 20px; }
  .tab {
    flex: 1;
    padding: 12px;
    background: #f7fafc;
    border: 2px solid #e2e8f0;
    border-radius: 8px;
    cursor: pointer;
    text-align: center;
    font-weight: 600;
    color: #4a5568;
  }
  .tab.active { background: #667eea; color: white; border-color: #667eea; }
  .form-section { display: none; }
  .form-section.active { display: block; }
  .row { display: flex; gap: 10px; }
  .checkbox-group { display: flex; gap: 20px; flex-wrap: wrap; }
  .checkbox-label { display: flex; align-items: center; gap: 8px; cursor: pointer; }
  .checkbox-label input[type="checkbox"] { width: auto; }
  button {
    width: 100%;
    padding: 14px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    border: none;
    border-radius: 8px;
    font-size: 16px;
    font-weight: 600;
    cursor: pointer;
  }
  button:disabled { opacity: 0.6; cursor: wait; }
  #result { margin-top: 30px; }
  .card { background: #f7fafc; border-radius: 8px; padding: 20px; margin-bottom: 15px; }
  .card h3 { color: #2d3748; margin-bottom: 10px; }
  .card p { color: #4a5568; margin: 4px 0; }
  .error { background: #fff5f5; color: #c53030; }
  .ok { color: #2f855a; font-weight: 600; }
  .no { color: #c53030; font-weight: 600; }
</style>
</head>
<body>
<div class="container">
  <h1>⚖️ eCourts Scraper</h1>
  <p class="subtitle">Search case status and check daily listings on eCourts India</p>

  <div class="tabs">
    <div class="tab active" data-type="cnr">CNR Number</div>
    <div class="tab" data-type="case">Case Number</div>
  </div>

  <form id="search-form">
    <div class="form-section active" id="section-cnr">
      <div class="form-group">
        <label for="cnr">CNR Number</label>
        <input id="cnr" name="cnr" placeholder="DLCT01-123456-2024">
      </div>
    </div>

    <div class="form-section" id="section-case">
      <div class="row">
        <div class="form-group">
          <label for="caseType">Case Type</label>
          <input id="caseType" name="caseType" placeholder="CS">
        </div>
        <div class="form-group">
          <label for="caseNo">Case Number</label>
          <input id="caseNo" name="caseNo" placeholder="123">
        </div>
        <div class="form-group">
          <label for="caseYear">Year</label>
          <input id="caseYear" name="caseYear" placeholder="2024">
        </div>
      </div>
    </div>

    <div class="row">
      <div class="form-group">
        <label for="state">State Code</label>
        <input id="state" name="state" placeholder="DL">
      </div>
      <div class="form-group">
        <label for="dist">District Code</label>
        <input id="dist" name="dist" placeholder="01">
      </div>
      <div class="form-group">
        <label for="court">Court Code</label>
        <input id="court" name="court" placeholder="optional">
      </div>
    </div>

    <div class="form-group">
      <label for="checkDate">Check Listing</label>
      <select id="checkDate" name="checkDate">
        <option value="">Don't check</option>
        <option value="today">Today</option>
        <option value="tomorrow">Tomorrow</option>
      </select>
    </div>

    <div class="form-group checkbox-group">
      <label class="checkbox-label"><input type="checkbox" id="downloadPdf"> Download case PDF</label>
      <label class="checkbox-label"><input type="checkbox" id="downloadCauseList"> Download cause list</label>
    </div>

    <button type="submit" id="submit">Search</button>
  </form>

  <div id="result"></div>
</div>

<script>
  let searchType = 'cnr';

  document.querySelectorAll('.tab').forEach(tab => {
    tab.addEventListener('click', () => {
      searchType = tab.dataset.type;
      document.querySelectorAll('.tab').forEach(t => t.classList.toggle('active', t === tab));
      document.querySelectorAll('.form-section').forEach(s =>
        s.classList.toggle('active', s.id === 'section-' + searchType));
    });
  });

  function escapeHtml(value) {
    const div = document.createElement('div');
    div.textContent = value == null ? '' : String(value);
    return div.innerHTML;
  }

  function field(label, value) {
    return value ? `<p><strong>${label}:</strong> ${escapeHtml(value)}</p>` : '';
  }

  function render(data) {
    const info = data.case_info;
    let html = `<div class="card"><h3>📋 Case Information</h3>
      ${field('Case ID', info.case_id)}
      <p><strong>Found:</strong> <span class="${info.found ? 'ok' : 'no'}">${info.found ? '✓ Yes' : '✗ No'}</span></p>
      ${field('Court', info.court_name)}
      ${field('Serial', info.serial_number)}
      ${field('Parties', info.party_names)}
      ${field('Status', info.case_status)}
      ${field('Next Hearing', info.next_hearing_date)}
      ${field('Error', info.error)}
      ${field('Note', info.note)}
    </div>`;

    if (data.listing_info) {
      const l = data.listing_info;
      html += `<div class="card"><h3>📅 Listing Status</h3>
        ${field('Date', l.check_date)}
        <p><strong>Listed:</strong> <span class="${l.is_listed ? 'ok' : 'no'}">${l.is_listed ? '✓ Yes' : '✗ No'}</span></p>
      </div>`;
    }

    if (data.downloads && data.downloads.length) {
      html += '<div class="card"><h3>📥 Downloads</h3>';
      data.downloads.forEach(d => {
        const href = '/api/download/' + encodeURI(d.file);
        html += `<p><a href="${href}">${escapeHtml(d.type)}: ${escapeHtml(d.file)}</a></p>`;
      });
      html += '</div>';
    }
    return html;
  }

  document.getElementById('search-form').addEventListener('submit', async event => {
    event.preventDefault();
    const button = document.getElementById('submit');
    const result = document.getElementById('result');
    const value = id => document.getElementById(id).value.trim();

    const payload = {
      searchType,
      cnr: value('cnr'),
      caseType: value('caseType'),
      caseNo: value('caseNo'),
      caseYear: value('caseYear'),
      state: value('state'),
      dist: value('dist'),
      court: value('court'),
      checkDate: value('checkDate') || null,
      downloadPdf: document.getElementById('downloadPdf').checked,
      downloadCauseList: document.getElementById('downloadCauseList').checked,
    };

    button.disabled = true;
    button.textContent = 'Searching...';
    try {
      const response = await fetch('/api/search', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
      const data = await response.json();
      result.innerHTML = response.ok
        ? render(data)
        : `<div class="card error">❌ ${escapeHtml(data.error)}</div>`;
    } catch (err) {
      result.innerHTML = `<div class="card error">❌ ${escapeHtml(err.message)}</div>`;
    } finally {
      button.disabled = false;
      button.textContent = 'Search';
    }
  });
</script>
</body>
</html>
"#;
