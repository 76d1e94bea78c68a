use anyhow::Result;
use pxdash_data::table::PriceRow;
use rocket::fs::relative;
use rocket::{get, routes, Build, Rocket, State};
use rocket_dyn_templates::{context, Template};
use serde::Serialize;

/// A [`PriceRow`] pre-formatted for the template; absent cells render
/// as empty strings, so the template carries no numeric logic.
#[derive(Serialize, Debug)]
struct DisplayRow {
    sedol: String,
    price: String,
    dated: String,
    change: String,
    highlight: String,
}

impl From<&PriceRow> for DisplayRow {
    fn from(row: &PriceRow) -> Self {
        Self {
            sedol: row.sedol.clone(),
            price: row.price.map(|price| format!("{price:.2}")).unwrap_or_default(),
            dated: row.dated.map(|dated| dated.to_string()).unwrap_or_default(),
            change: row
                .change
                .map(|change| format!("{change:+.2}"))
                .unwrap_or_default(),
            highlight: row.highlight.to_string(),
        }
    }
}

// dashboard
#[get("/")]
async fn dashboard(table: &State<Vec<PriceRow>>) -> Template {
    let rows: Vec<DisplayRow> = table.iter().map(DisplayRow::from).collect();

    Template::render("dashboard", context! {
        title: "Security Prices",
        rows: rows,
    })
}

/// Build the Rocket instance serving the dashboard.
pub fn rocket(table: Vec<PriceRow>) -> Rocket<Build> {
    // templates live next to this crate's manifest, not the process cwd
    let figment = rocket::Config::figment().merge(("template_dir", relative!("templates")));

    rocket::custom(figment)
        // add templating system
        .attach(Template::fairing())

        // the derived table; fetched once per run
        .manage(table)

        // register routes
        .mount("/", routes![dashboard])
}

/// Launch the dashboard web process; resolves once the server shuts down.
pub async fn serve(table: Vec<PriceRow>) -> Result<()> {
    let _rocket = rocket(table).launch().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxdash_data::table::Highlight;
    use rocket::http::Status;
    use rocket::local::blocking::Client;

    fn row(
        sedol: &str,
        price: Option<f64>,
        dated: Option<&str>,
        change: Option<f64>,
        highlight: Highlight,
    ) -> PriceRow {
        PriceRow {
            sedol: sedol.to_string(),
            price,
            dated: dated.map(|dated| dated.parse().unwrap()),
            change,
            highlight,
        }
    }

    fn sample_table() -> Vec<PriceRow> {
        vec![
            row(
                "B0YBKJ7",
                Some(89.0),
                Some("2026-08-06"),
                Some(-11.0),
                Highlight::Yellow,
            ),
            row(
                "0263494",
                Some(95.0),
                Some("2026-08-06"),
                Some(-5.0),
                Highlight::None,
            ),
            row("B1YW440", None, None, None, Highlight::None),
        ]
    }

    #[test]
    fn dashboard_renders_one_tr_per_security() {
        let client = Client::tracked(rocket(sample_table())).unwrap();
        let response = client.get("/").dispatch();
        assert_eq!(response.status(), Status::Ok);

        let body = response.into_string().unwrap();
        // header row + one per security
        assert_eq!(body.matches("<tr>").count(), 4);

        // universe order survives rendering
        let first = body.find("B0YBKJ7").unwrap();
        let second = body.find("0263494").unwrap();
        let third = body.find("B1YW440").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn only_flagged_cells_get_a_yellow_background() {
        let client = Client::tracked(rocket(sample_table())).unwrap();
        let body = client.get("/").dispatch().into_string().unwrap();
        assert_eq!(body.matches("background-color: yellow").count(), 1);
    }

    #[test]
    fn absent_values_render_as_empty_cells() {
        let client = Client::tracked(rocket(sample_table())).unwrap();
        let body = client.get("/").dispatch().into_string().unwrap();
        assert!(body.contains("B1YW440"));
        assert!(body.contains("<td></td>"));
    }
}
