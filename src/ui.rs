use crate::calendar::{DayCell, YearMonth};
use crate::view::{DashboardView, ReservationRow, RoomCard};
use std::fmt::Write as _;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const STATUSES: [&str; 5] = ["pending", "confirmed", "active", "completed", "cancelled"];
const PAYMENT_STATUSES: [&str; 3] = ["pending", "partial", "paid"];

pub fn render_dashboard(view: &DashboardView) -> String {
    let notice = match (&view.notice, view.stale) {
        (Some(message), _) => format!(r#"<p class="notice">{}</p>"#, escape(message)),
        (None, true) => {
            r#"<p class="notice">Showing the last loaded data; the hotel API could not be reached.</p>"#
                .to_string()
        }
        (None, false) => String::new(),
    };

    let today = view.today.format("%A, %B %-d, %Y").to_string();
    let prev_link = month_link(view.previous);
    let next_link = month_link(view.next);
    let query = month_query(view.month);

    fill(
        DASHBOARD_HTML,
        &[
            ("STYLE", STYLE),
            ("HOTEL", escape(&view.hotel_name).as_str()),
            ("USER", escape(&view.username).as_str()),
            ("TODAY", today.as_str()),
            ("NOTICE", notice.as_str()),
            ("SUMMARY", render_summary(view).as_str()),
            ("MONTH_TITLE", view.month.title().as_str()),
            ("PREV_LINK", prev_link.as_str()),
            ("NEXT_LINK", next_link.as_str()),
            ("CALENDAR", render_calendar(view).as_str()),
            ("ROOMS", render_rooms(&view.rooms, &query).as_str()),
            ("NEW_ROOM", render_new_room(&query).as_str()),
            ("RESERVATIONS", render_reservations(view).as_str()),
            ("NEW_RESERVATION", render_new_reservation(view).as_str()),
            ("SETTINGS", render_settings(view).as_str()),
            ("PASSWORD", render_password(&query).as_str()),
        ],
    )
}

pub fn render_login(message: Option<&str>) -> String {
    let message = message
        .map(|text| format!(r#"<p class="notice">{}</p>"#, escape(text)))
        .unwrap_or_default();
    fill(LOGIN_HTML, &[("STYLE", STYLE), ("MESSAGE", message.as_str())])
}

/// Substitutes `{{NAME}}` placeholders in a single pass over the template.
/// Inserted values are never scanned again, so text that happens to look like
/// a placeholder is emitted as-is.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut html = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            html.push_str(&rest[start..]);
            return html;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => html.push_str(value),
            None => html.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    html.push_str(rest);
    html
}

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
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

fn month_link(month: YearMonth) -> String {
    format!("/?year={}&amp;month={}", month.year(), month.month())
}

fn month_query(month: YearMonth) -> String {
    format!("?year={}&amp;month={}", month.year(), month.month())
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

fn render_summary(view: &DashboardView) -> String {
    let summary = &view.summary;
    let stats = [
        ("Rooms", summary.total_rooms.to_string()),
        ("Occupied", summary.occupied_rooms.to_string()),
        ("Available", summary.available_rooms.to_string()),
        ("Occupancy", format!("{:.0}%", summary.occupancy_rate)),
        ("Arrivals today", summary.arrivals_today.to_string()),
        ("Departures today", summary.departures_today.to_string()),
        ("Revenue this month", money(summary.monthly_revenue)),
    ];

    let mut html = String::new();
    for (label, value) in stats {
        let _ = write!(
            html,
            r#"<div class="stat"><span class="label">{label}</span><span class="value">{value}</span></div>"#
        );
    }
    html
}

fn render_calendar(view: &DashboardView) -> String {
    let mut html = String::from("<thead><tr>");
    for weekday in WEEKDAYS {
        let _ = write!(html, "<th>{weekday}</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for week in view.grid.weeks() {
        html.push_str("<tr>");
        for cell in week {
            html.push_str(&render_day(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody>");
    html
}

fn render_day(cell: &DayCell) -> String {
    let mut classes = vec!["day"];
    if !cell.is_current_month {
        classes.push("filler");
    }
    if cell.is_today {
        classes.push("today");
    }
    if !cell.occupying_reservations.is_empty() {
        classes.push("occupied");
    }

    let mut html = format!(
        r#"<td class="{}"><span class="day-number">{}</span>"#,
        classes.join(" "),
        cell.day
    );
    for reservation in &cell.occupying_reservations {
        let _ = write!(
            html,
            r#"<span class="booking status-{}" title="{} · {}">{}</span>"#,
            reservation.status.as_str(),
            escape(&reservation.guest_name),
            escape(&reservation.room_label()),
            escape(&reservation.guest_name),
        );
    }
    html.push_str("</td>");
    html
}

fn render_rooms(rooms: &[RoomCard], query: &str) -> String {
    if rooms.is_empty() {
        return r#"<p class="hint">No rooms yet.</p>"#.to_string();
    }

    let mut html = String::new();
    for room in rooms {
        let (state, detail) = if room.occupied {
            ("occupied", room.guest.clone().unwrap_or_else(|| "Occupied".to_string()))
        } else {
            ("available", "Available".to_string())
        };
        let _ = write!(
            html,
            r#"<div class="room {state}"><span class="room-number">{number}</span><span class="room-name">{name}</span><span class="hint">{room_type} · {price}/night</span><span class="room-state">{detail}</span>
<details><summary>Edit</summary>
<form class="edit" method="post" action="/rooms/{id}/update{query}">
<label>Name<input name="name" value="{stored_name}"></label>
<label>Type<input name="type" value="{room_type}"></label>
<label>Price<input name="price" value="{price}"></label>
<button class="btn-small">Save</button>
</form>
<form method="post" action="/rooms/{id}/delete{query}"><button class="btn-small danger">Delete room</button></form>
</details></div>"#,
            id = room.id,
            number = escape(&room.number),
            name = escape(&room.name),
            stored_name = escape(&room.stored_name),
            room_type = escape(&room.room_type),
            price = money(room.price),
            detail = escape(&detail),
        );
    }
    html
}

fn render_new_room(query: &str) -> String {
    format!(
        r#"<details><summary>Add a room</summary>
<form class="edit" method="post" action="/rooms{query}">
<label>Number<input name="room_number" required></label>
<label>Name<input name="name"></label>
<label>Type<input name="type" value="Standard"></label>
<label>Price<input name="price" value="0"></label>
<button class="btn-primary">Add room</button>
</form>
</details>"#
    )
}

fn render_reservations(view: &DashboardView) -> String {
    if view.reservations.is_empty() {
        return r#"<p class="hint">No reservations yet.</p>"#.to_string();
    }

    let query = month_query(view.month);
    let mut html = String::from(
        "<table class=\"list\"><thead><tr><th>Guest</th><th>Room</th><th>Stay</th><th>Nights</th><th>Status</th><th>Paid</th><th></th></tr></thead><tbody>",
    );
    for row in &view.reservations {
        html.push_str(&render_reservation_row(row, &query));
    }
    html.push_str("</tbody></table>");
    html
}

fn render_reservation_row(row: &ReservationRow, query: &str) -> String {
    let reservation = &row.reservation;
    let id = reservation.id;
    let nights = (reservation.check_out_date - reservation.check_in_date).num_days();

    let mut actions = String::new();
    if row.can_check_in {
        let _ = write!(
            actions,
            r#"<form method="post" action="/reservations/{id}/checkin{query}"><button class="btn-small">Check in</button></form>"#
        );
    }
    if row.can_check_out {
        let _ = write!(
            actions,
            r#"<form method="post" action="/reservations/{id}/checkout{query}"><button class="btn-small">Check out</button></form>"#
        );
    }
    let _ = write!(
        actions,
        r#"<form method="post" action="/reservations/{id}/delete{query}"><button class="btn-small danger">Delete</button></form>"#
    );

    let status_options = options(&STATUSES, reservation.status.as_str());
    let payment_options = options(&PAYMENT_STATUSES, &reservation.payment_status);

    format!(
        r#"<tr>
<td>{guest}<span class="hint">{email}</span></td>
<td>{room}</td>
<td>{check_in} → {check_out}</td>
<td>{nights}</td>
<td><span class="badge status-{status}">{status}</span></td>
<td>{paid} / {total}<span class="hint">due {due}</span></td>
<td class="row-actions">{actions}
<details><summary>Edit</summary>
<form class="edit" method="post" action="/reservations/{id}/update{query}">
<label>Guest<input name="guest_name" value="{guest}"></label>
<label>Email<input name="guest_email" value="{email}"></label>
<label>Phone<input name="guest_phone" value="{phone}"></label>
<label>Check-in<input type="date" name="check_in_date" value="{check_in}"></label>
<label>Check-out<input type="date" name="check_out_date" value="{check_out}"></label>
<label>Paid<input name="amount_paid" value="{paid}"></label>
<label>Payment<select name="payment_status">{payment_options}</select></label>
<label>Status<select name="status">{status_options}</select></label>
<label>Notes<input name="notes" value="{notes}"></label>
<button class="btn-small">Save</button>
</form>
</details></td>
</tr>"#,
        guest = escape(&reservation.guest_name),
        email = escape(&reservation.guest_email),
        phone = escape(&reservation.guest_phone),
        room = escape(&row.room_label),
        check_in = reservation.check_in_date,
        check_out = reservation.check_out_date,
        status = reservation.status.as_str(),
        paid = money(reservation.amount_paid),
        total = money(reservation.total_price),
        due = money(reservation.balance_due()),
        notes = escape(&reservation.notes),
    )
}

/// A current value outside `values` is kept as a blank-valued selected
/// option, so saving an unrelated edit leaves it untouched.
fn options(values: &[&str], selected: &str) -> String {
    let mut html = String::new();
    if !values.contains(&selected) {
        let label = if selected.is_empty() { "unset" } else { selected };
        let _ = write!(html, r#"<option value="" selected>{}</option>"#, escape(label));
    }
    for value in values {
        let marker = if *value == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{value}"{marker}>{value}</option>"#);
    }
    html
}

fn render_new_reservation(view: &DashboardView) -> String {
    let mut rooms = String::new();
    for room in &view.rooms {
        let _ = write!(
            rooms,
            r#"<option value="{}">{} · {}</option>"#,
            room.id,
            escape(&room.number),
            escape(&room.name)
        );
    }
    let check_out = view.today.succ_opt().unwrap_or(view.today);

    format!(
        r#"<form class="edit" method="post" action="/reservations{query}">
<label>Guest<input name="guest_name" required></label>
<label>Email<input type="email" name="guest_email"></label>
<label>Phone<input name="guest_phone"></label>
<label>Room<select name="room_id" required>{rooms}</select></label>
<label>Check-in<input type="date" name="check_in_date" value="{today}" required></label>
<label>Check-out<input type="date" name="check_out_date" value="{check_out}" required></label>
<label>Paid<input name="amount_paid" value="0"></label>
<label>Payment<select name="payment_status">{payments}</select></label>
<label>Notes<input name="notes"></label>
<button class="btn-primary">Create reservation</button>
</form>"#,
        query = month_query(view.month),
        today = view.today,
        payments = options(&PAYMENT_STATUSES, "pending"),
    )
}

fn render_settings(view: &DashboardView) -> String {
    let settings = &view.settings;
    format!(
        r#"<form class="edit" method="post" action="/settings{query}">
<label>Hotel name<input name="hotel_name" value="{name}" required></label>
<label>Address<input name="hotel_address" value="{address}"></label>
<label>Phone<input name="hotel_phone" value="{phone}"></label>
<label>Email<input type="email" name="hotel_email" value="{email}"></label>
<button class="btn-primary">Save settings</button>
</form>"#,
        query = month_query(view.month),
        name = escape(&settings.hotel_name),
        address = escape(&settings.hotel_address),
        phone = escape(&settings.hotel_phone),
        email = escape(&settings.hotel_email),
    )
}

fn render_password(query: &str) -> String {
    format!(
        r#"<form class="edit" method="post" action="/password{query}">
<label>Current password<input type="password" name="current_password" autocomplete="current-password" required></label>
<label>New password<input type="password" name="new_password" autocomplete="new-password" minlength="6" required></label>
<label>Repeat new password<input type="password" name="confirm_password" autocomplete="new-password" minlength="6" required></label>
<button class="btn-primary">Change password</button>
</form>"#
    )
}

const STYLE: &str = r#"
    :root {
      --bg-1: #f4f1ea;
      --bg-2: #cfe0e8;
      --ink: #24303a;
      --accent: #d9734e;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e9eef0 60%, #f6f3ee 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1180px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    .app.narrow {
      width: min(420px, 100%);
    }

    header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle, .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
      display: block;
    }

    .notice {
      margin: 0;
      padding: 12px 16px;
      border-radius: 14px;
      background: #fff1e8;
      color: #a3472a;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 14px;
    }

    .stat, .room {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .room.occupied {
      border-color: rgba(217, 115, 78, 0.5);
    }

    .room-number {
      font-weight: 600;
      font-size: 1.2rem;
    }

    .calendar-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .calendar-nav a {
      color: var(--accent-2);
      text-decoration: none;
      font-weight: 600;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    table.calendar td {
      vertical-align: top;
      height: 84px;
      width: 14.28%;
      border: 1px solid rgba(47, 72, 88, 0.1);
      padding: 6px;
      background: white;
    }

    table.calendar td.filler {
      background: transparent;
      color: #b3ada6;
    }

    table.calendar td.today {
      outline: 2px solid var(--accent);
    }

    .booking {
      display: block;
      margin-top: 4px;
      padding: 2px 6px;
      border-radius: 8px;
      font-size: 0.75rem;
      background: #e3edf2;
      overflow: hidden;
      text-overflow: ellipsis;
      white-space: nowrap;
    }

    .status-active {
      background: #fde2d6;
    }

    .status-completed, .status-cancelled {
      background: #ecebe8;
      color: #8b857d;
    }

    table.list th, table.list td {
      text-align: left;
      padding: 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.1);
      vertical-align: top;
    }

    .badge {
      padding: 2px 8px;
      border-radius: 999px;
      font-size: 0.8rem;
    }

    .row-actions form {
      display: inline-block;
      margin: 0 4px 4px 0;
    }

    form.edit {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 10px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: #6f6a65;
    }

    input, select {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      padding: 12px 18px;
    }

    .btn-small {
      background: var(--accent-2);
      color: white;
      padding: 6px 12px;
      font-size: 0.8rem;
    }

    .btn-small.danger {
      background: #c63b2b;
    }

    @media (max-width: 700px) {
      .app {
        padding: 24px 16px;
      }
      table.calendar td {
        height: 56px;
      }
    }
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{HOTEL}} · Dashboard</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>{{HOTEL}}</h1>
        <p class="subtitle">{{TODAY}}</p>
      </div>
      <form method="post" action="/logout">
        <span class="hint">Signed in as {{USER}}</span>
        <button class="btn-small">Log out</button>
      </form>
    </header>

    {{NOTICE}}

    <section class="panel">{{SUMMARY}}</section>

    <section>
      <div class="calendar-nav">
        <a href="{{PREV_LINK}}">&larr; Previous</a>
        <h2>{{MONTH_TITLE}}</h2>
        <a href="{{NEXT_LINK}}">Next &rarr;</a>
      </div>
      <table class="calendar">{{CALENDAR}}</table>
    </section>

    <section>
      <h2>Rooms</h2>
      <div class="panel">{{ROOMS}}</div>
      {{NEW_ROOM}}
    </section>

    <section>
      <h2>Reservations</h2>
      {{RESERVATIONS}}
    </section>

    <section>
      <h2>New reservation</h2>
      {{NEW_RESERVATION}}
    </section>

    <section>
      <h2>Settings</h2>
      {{SETTINGS}}
    </section>

    <section>
      <h2>Password</h2>
      {{PASSWORD}}
    </section>
  </main>
</body>
</html>
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Hotel Dashboard · Sign in</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app narrow">
    <header>
      <h1>Sign in</h1>
    </header>

    {{MESSAGE}}

    <form class="edit" method="post" action="/login">
      <label>Username<input name="username" autocomplete="username" required></label>
      <label>Password<input type="password" name="password" autocomplete="current-password" required></label>
      <button class="btn-primary">Sign in</button>
    </form>

    <details>
      <summary>Create an account</summary>
      <form class="edit" method="post" action="/register">
        <label>Username<input name="username" required></label>
        <label>Email<input type="email" name="email"></label>
        <label>Password<input type="password" name="password" minlength="6" required></label>
        <button class="btn-small">Register</button>
      </form>
    </details>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DashboardData;
    use crate::view::build_view;
    use chrono::NaiveDate;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"<b>"O'Hara" & co</b>"#), "&lt;b&gt;&quot;O&#39;Hara&quot; &amp; co&lt;/b&gt;");
    }

    #[test]
    fn dashboard_renders_grid_and_escapes_guests() {
        let reservation = serde_json::from_value(serde_json::json!({
            "id": 4, "room_id": 1, "room_number": "101", "guest_name": "<script>",
            "check_in_date": "2024-03-10", "check_out_date": "2024-03-12", "status": "confirmed"
        }))
        .unwrap();
        let data = DashboardData {
            reservations: vec![reservation],
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let view = build_view(&data, "frontdesk", YearMonth::new(2024, 3).unwrap(), today, false).unwrap();
        let html = render_dashboard(&view);

        assert!(html.contains("March 2024"));
        assert!(html.contains("/?year=2024&amp;month=2"));
        assert!(html.contains("/?year=2024&amp;month=4"));
        assert!(html.contains("/reservations/4/checkin"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert_eq!(html.matches("<tr><td class=\"day").count(), 6);
        assert!(!html.contains("{{"));
    }

    fn march_view(reservation: serde_json::Value) -> DashboardView {
        let data = DashboardData {
            reservations: vec![serde_json::from_value(reservation).unwrap()],
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        build_view(&data, "frontdesk", YearMonth::new(2024, 3).unwrap(), today, false).unwrap()
    }

    #[test]
    fn placeholder_text_in_guest_names_is_not_expanded() {
        let view = march_view(serde_json::json!({
            "id": 4, "room_id": 1, "guest_name": "{{SETTINGS}}",
            "check_in_date": "2024-03-10", "check_out_date": "2024-03-12", "status": "confirmed"
        }));
        let html = render_dashboard(&view);

        assert_eq!(html.matches(r#"action="/settings"#).count(), 1);
        assert_eq!(html.matches(r#"action="/password"#).count(), 1);
        assert!(html.contains(r#"<span class="booking status-confirmed" title="{{SETTINGS}} · Room 1">{{SETTINGS}}</span>"#));
    }

    #[test]
    fn fill_leaves_unknown_and_unterminated_placeholders() {
        assert_eq!(fill("a {{X}} b {{Y}} c {{", &[("X", "{{Y}}")]), "a {{Y}} b {{Y}} c {{");
    }

    #[test]
    fn unlisted_status_is_kept_on_edit() {
        let view = march_view(serde_json::json!({
            "id": 4, "room_id": 1, "guest_name": "Ada",
            "check_in_date": "2024-03-10", "check_out_date": "2024-03-12",
            "status": "no_show", "payment_status": "refunded"
        }));
        let html = render_dashboard(&view);

        assert!(html.contains(r#"<select name="status"><option value="" selected>unknown</option><option value="pending">pending</option>"#));
        assert!(html.contains(r#"<select name="payment_status"><option value="" selected>refunded</option><option value="pending">pending</option>"#));
        assert_eq!(html.matches(r#"<option value="pending" selected>"#).count(), 1);
    }

    #[test]
    fn known_status_is_preselected() {
        assert_eq!(
            options(&PAYMENT_STATUSES, "partial"),
            r#"<option value="pending">pending</option><option value="partial" selected>partial</option><option value="paid">paid</option>"#
        );
    }

    #[test]
    fn login_page_shows_message() {
        let html = render_login(Some("Invalid credentials"));
        assert!(html.contains("Invalid credentials"));
        assert!(!html.contains("{{"));
    }
}
