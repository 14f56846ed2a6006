//! Roamly CLI - interactive city activity explorer.
//!
//! One command per user interaction; each command runs a single pass over
//! current session state and re-renders. Errors are printed and the
//! session keeps going.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Parser;

use roamly_app::{Category, Explorer, SearchOutcome, SessionState, SortOrder, PRESET_HELP};
use roamly_catalog::CityCandidate;
use roamly_core::Config;

#[derive(Parser)]
#[command(
    name = "roamly",
    version,
    about = "City activity explorer with weather-aware filtering"
)]
struct Cli {
    /// Catalogue API client ID (overrides config and ROAMLY_CLIENT_ID)
    #[arg(long)]
    client_id: Option<String>,

    /// Catalogue API client secret (overrides config and ROAMLY_CLIENT_SECRET)
    #[arg(long)]
    client_secret: Option<String>,
}

struct Session {
    explorer: Explorer,
    state: SessionState,
    cities: Vec<CityCandidate>,
    selected: Option<CityCandidate>,
    outcome: Option<SearchOutcome>,
    radius_km: u8,
    date: NaiveDate,
    page_size: usize,
    sort: SortOrder,
}

#[tokio::main]
async fn main() -> Result<()> {
    roamly_core::init()?;

    let cli = Cli::parse();
    let (mut config, _validation) = Config::load_validated()?;

    if let Some(id) = cli.client_id {
        config.catalog.client_id = id;
    }
    if let Some(secret) = cli.client_secret {
        config.catalog.client_secret = secret;
    }

    let explorer = Explorer::from_config(&config)?;

    let mut session = Session {
        explorer,
        state: SessionState::new(),
        cities: Vec::new(),
        selected: None,
        outcome: None,
        radius_km: config.defaults.radius_km,
        date: Utc::now().date_naive(),
        page_size: config.defaults.page_size,
        sort: SortOrder::Unsorted,
    };

    println!("Roamly - type 'help' for commands, 'quit' to exit.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => print_help(),
            "city" => session.search_cities(rest).await,
            "pick" => session.pick_city(rest),
            "date" => session.set_date(rest),
            "radius" => session.set_radius(rest),
            "pagesize" => session.set_page_size(rest),
            "sort" => session.set_sort(rest),
            "cats" => session.set_categories(rest),
            "toggle" => session.toggle_category(rest),
            "preset" => session.request_preset(),
            "search" => session.run_search().await,
            "next" => session.next_page(),
            "prev" => session.prev_page(),
            "weather" => session.show_weather(),
            other => println!("Unknown command: {} (try 'help')", other),
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Commands:
  city <text>        search for a city
  pick <n>           select city n from the last search
  date <yyyy-mm-dd>  set the travel date
  radius <1-20>      set the search radius in km
  pagesize <n>       set results per page
  sort <order>       none | rating-asc | rating-desc | price-asc | price-desc
  cats <a,b,..>      set active categories (or 'cats none' to clear)
  toggle <category>  toggle one category
  preset             apply the weather preset on the next search
  search             fetch activities and weather for the selected city
  next / prev        page through results
  weather            show the three-year weather table
  quit               exit
Categories: tours, museums, restaurants, wine, historical, sightseeing
"
    );
    println!("{}", PRESET_HELP);
}

impl Session {
    async fn search_cities(&mut self, query: &str) {
        if query.is_empty() {
            println!("Usage: city <text>");
            return;
        }

        match self.explorer.search_cities(query).await {
            Ok(cities) if cities.is_empty() => {
                self.cities = cities;
                println!("No matches.");
            }
            Ok(cities) => {
                self.cities = cities;
                for (i, city) in self.cities.iter().enumerate() {
                    println!(
                        "  {}. {}  ({:.4}, {:.4})",
                        i + 1,
                        city.label(),
                        city.latitude,
                        city.longitude
                    );
                }
                println!("Select with: pick <n>");
            }
            Err(e) => println!("Error: {}", e.user_message()),
        }
    }

    fn pick_city(&mut self, arg: &str) {
        let Ok(index) = arg.parse::<usize>() else {
            println!("Usage: pick <n>");
            return;
        };
        match self.cities.get(index.wrapping_sub(1)) {
            Some(city) => {
                println!("Selected {}", city.label());
                self.selected = Some(city.clone());
            }
            None => println!("No city number {} in the last search.", index),
        }
    }

    fn set_date(&mut self, arg: &str) {
        match arg.parse::<NaiveDate>() {
            Ok(date) => {
                self.date = date;
                println!("Date set to {}", date);
            }
            Err(_) => println!("Usage: date <yyyy-mm-dd>"),
        }
    }

    fn set_radius(&mut self, arg: &str) {
        match arg.parse::<u8>() {
            Ok(r) if (1..=20).contains(&r) => {
                self.radius_km = r;
                println!("Radius set to {} km", r);
            }
            _ => println!("Radius must be 1-20 km."),
        }
    }

    fn set_page_size(&mut self, arg: &str) {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 => {
                self.page_size = n;
                self.show_page();
            }
            _ => println!("Page size must be a positive number."),
        }
    }

    fn set_sort(&mut self, arg: &str) {
        match arg.parse::<SortOrder>() {
            Ok(sort) => {
                self.sort = sort;
                self.show_page();
            }
            Err(e) => println!("{}", e),
        }
    }

    fn set_categories(&mut self, arg: &str) {
        if arg.is_empty() {
            println!("Usage: cats <a,b,..> or 'cats none'");
            return;
        }

        if arg.eq_ignore_ascii_case("none") {
            self.state.set_categories(BTreeSet::new());
            self.show_page();
            return;
        }

        let mut categories = BTreeSet::new();
        for part in arg.split(',') {
            match part.parse::<Category>() {
                Ok(c) => {
                    categories.insert(c);
                }
                Err(e) => {
                    println!("{}", e);
                    return;
                }
            }
        }

        self.state.set_categories(categories);
        self.show_page();
    }

    fn toggle_category(&mut self, arg: &str) {
        match arg.parse::<Category>() {
            Ok(category) => {
                self.state.toggle_category(category);
                self.show_page();
            }
            Err(e) => println!("{}", e),
        }
    }

    fn request_preset(&mut self) {
        self.state.request_preset();
        println!("Weather preset will be applied when the next search completes.");
    }

    async fn run_search(&mut self) {
        let Some(city) = self.selected.clone() else {
            println!("Pick a city first (city <text>, then pick <n>).");
            return;
        };

        match self
            .explorer
            .run_search(&mut self.state, &city, self.radius_km, self.date)
            .await
        {
            Ok(outcome) => {
                if outcome.preset_applied {
                    let labels: Vec<&str> = self
                        .state
                        .active_categories()
                        .iter()
                        .map(|c| c.display_name())
                        .collect();
                    println!("Weather preset applied: {}", labels.join(", "));
                }
                if outcome.samples.is_empty() {
                    println!("No weather data available for {}.", self.date);
                }
                self.outcome = Some(outcome);
                self.show_page();
            }
            Err(e) => println!("Error: {}", e.user_message()),
        }
    }

    fn next_page(&mut self) {
        let Some(outcome) = &self.outcome else {
            println!("Run a search first.");
            return;
        };
        let max_page = self
            .explorer
            .page(
                &mut self.state,
                &outcome.activities,
                self.sort,
                self.page_size,
            )
            .max_page;
        self.state.next_page(max_page);
        self.show_page();
    }

    fn prev_page(&mut self) {
        if self.outcome.is_none() {
            println!("Run a search first.");
            return;
        }
        self.state.prev_page();
        self.show_page();
    }

    fn show_page(&mut self) {
        let Some(outcome) = &self.outcome else {
            return;
        };

        let page = self.explorer.page(
            &mut self.state,
            &outcome.activities,
            self.sort,
            self.page_size,
        );

        let labels: Vec<&str> = self
            .state
            .active_categories()
            .iter()
            .map(|c| c.display_name())
            .collect();
        let filter_label = if labels.is_empty() {
            "all".to_string()
        } else {
            labels.join(", ")
        };

        println!(
            "Page {}/{} - {} activities (filter: {}, sort: {})",
            page.page,
            page.max_page,
            page.total,
            filter_label,
            self.sort.display_name()
        );

        for activity in &page.items {
            let rating = activity
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string());

            let price = match &activity.price {
                Some(p) => format!(
                    "{} {}",
                    p.amount.as_deref().unwrap_or("?"),
                    p.currency.as_deref().unwrap_or("")
                ),
                None => "-".to_string(),
            };

            println!("  * {}  [rating {} | {}]", activity.name, rating, price);
            if let Some(description) = &activity.description {
                println!("      {}", description);
            }
            if let Some(duration) = &activity.duration {
                println!("      duration: {}", duration);
            }
            if let Some(picture) = activity.pictures.first() {
                println!("      picture: {}", picture);
            }
            if let Some(link) = &activity.booking_link {
                println!("      book: {}", link);
            }
        }
    }

    fn show_weather(&self) {
        let Some(outcome) = &self.outcome else {
            println!("Run a search first.");
            return;
        };

        if outcome.samples.is_empty() {
            println!("No weather data available.");
            return;
        }

        println!("  date         max     min     precip");
        for sample in &outcome.samples {
            println!(
                "  {}   {:>5.1}C  {:>5.1}C  {:>5.1}mm",
                sample.date, sample.max_temp, sample.min_temp, sample.precipitation
            );
        }

        let assessment = &outcome.assessment;
        match assessment.avg_temp {
            Some(avg) => println!(
                "  rain expected: {}, average temperature: {:.1}C",
                if assessment.rain_expected { "yes" } else { "no" },
                avg
            ),
            None => println!("  rain/temperature unknown."),
        }
    }
}
