//! HTML rendering of driver standings
//!
//! Every value that originates upstream passes through [`html_escape`] before
//! it is embedded in the page.

use crate::f1::{standings_summary, StandingsRow, StandingsTable};
use html_escape::encode_text;

const STYLE: &str = r#"
      * { margin: 0; padding: 0; box-sizing: border-box; }
      body {
        font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
        background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
        padding: 20px;
        min-height: 100vh;
      }
      .container {
        max-width: 1200px;
        margin: 0 auto;
        background: white;
        border-radius: 15px;
        padding: 30px;
        box-shadow: 0 10px 40px rgba(0,0,0,0.2);
      }
      h1 { color: #e10600; text-align: center; margin-bottom: 10px; text-transform: uppercase; }
      .summary {
        background: #f8f9fa;
        padding: 15px;
        border-radius: 8px;
        margin-bottom: 25px;
        border-left: 4px solid #e10600;
      }
      table { width: 100%; border-collapse: collapse; }
      thead { background: #e10600; color: white; }
      th { padding: 15px; text-align: left; text-transform: uppercase; font-size: 0.9rem; }
      td { padding: 12px 15px; border-bottom: 1px solid #eee; }
      .gold { background-color: #ffd70033; }
      .silver { background-color: #c0c0c033; }
      .bronze { background-color: #cd7f3233; }
      .footer { text-align: center; margin-top: 30px; color: #666; font-size: 0.9rem; }
"#;

const NOT_AVAILABLE: &str = "N/A";

fn podium_class(position: u32) -> Option<&'static str> {
    match position {
        1 => Some("gold"),
        2 => Some("silver"),
        3 => Some("bronze"),
        _ => None,
    }
}

fn optional_cell(value: Option<&str>) -> String {
    encode_text(value.unwrap_or(NOT_AVAILABLE)).into_owned()
}

fn render_row(row: &StandingsRow) -> String {
    let class = match podium_class(row.position) {
        Some(podium) => format!("standing {podium}"),
        None => "standing".to_string(),
    };

    format!(
        r#"        <tr class="{class}" data-driver="{driver_id}">
          <td>{position}</td>
          <td><strong>{driver_name}</strong></td>
          <td>{code}</td>
          <td>{nationality}</td>
          <td>{team}</td>
          <td>{points}</td>
          <td>{wins}</td>
        </tr>
"#,
        driver_id = html_escape::encode_double_quoted_attribute(&row.driver_id),
        position = row.position,
        driver_name = encode_text(&row.driver_name),
        code = optional_cell(row.driver_code.as_deref()),
        nationality = optional_cell(row.nationality.as_deref()),
        team = optional_cell(row.team.as_deref()),
        points = row.points,
        wins = row.wins,
    )
}

/// Render a standings table as a complete HTML page.
///
/// Each row is emitted as a `<tr class="standing ...">` element, in table order.
pub fn render_standings_html(table: &StandingsTable) -> String {
    let season = encode_text(&table.season);
    let title = format!("F1 {season} Season - Driver Standings");
    let summary = encode_text(&standings_summary(table)).into_owned();
    let rows: String = table.rows.iter().map(render_row).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
  </head>
  <body>
    <div class="container">
      <h1>{title}</h1>
      <div class="summary"><strong>Summary:</strong> {summary}</div>
      <table>
        <thead>
          <tr>
            <th>Pos</th>
            <th>Driver</th>
            <th>Code</th>
            <th>Nationality</th>
            <th>Team</th>
            <th>Points</th>
            <th>Wins</th>
          </tr>
        </thead>
        <tbody>
{rows}        </tbody>
      </table>
      <div class="footer">
        <p>Data provided by the Ergast F1 API</p>
        <p>Season: {season} | Total Drivers: {total}</p>
      </div>
    </div>
  </body>
</html>
"#,
        total = table.rows.len(),
    )
}

/// Render a minimal page reporting that the standings could not be loaded.
pub fn render_error_html(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <body style="font-family: Arial; padding: 50px; text-align: center;">
    <h2 style="color: #e10600;">Error Loading F1 Data</h2>
    <p style="color: #666;">{}</p>
  </body>
</html>
"#,
        encode_text(message)
    )
}
