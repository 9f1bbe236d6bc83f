mod handlers;
mod views;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use iced::widget::container;
use iced::{Color, Element, Length, Size, Subscription, Task, Theme};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use filmdash::api::{ImportResult, UploadProgress};
use filmdash::config::AppSettings;
use filmdash::movie::{ApiEnvelope, Movie, StatsSummary, YearCount};
use filmdash::notify::{DialogOutcome, MessageKind};
use filmdash::routes::Route;
use filmdash::theme::{hex_rgb, ThemeVars};
use filmdash::visualization::{
    ActorNetwork, BudgetRevenueBucket, RankingEntry, RuntimeBucket, YearlyTrend,
};
use filmdash::{Api, ApiClient, ApiError, Notifier, ThemeMode};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Upload counters written from the request body stream and read on ticks.
#[derive(Debug, Default)]
pub struct ImportProgress {
    loaded: AtomicU64,
    total: AtomicU64,
}

impl ImportProgress {
    pub fn record(&self, progress: UploadProgress) {
        self.total.store(progress.total, Ordering::Relaxed);
        self.loaded.store(progress.loaded, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.loaded.store(0, Ordering::Relaxed);
        self.total.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> UploadProgress {
        UploadProgress {
            loaded: self.loaded.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Charts {
    pub budget_revenue: Vec<BudgetRevenueBucket>,
    pub runtime: Vec<RuntimeBucket>,
    pub ratings: Vec<RuntimeBucket>,
    pub trends: Vec<YearlyTrend>,
}

#[derive(Debug, Clone, Default)]
pub struct Rankings {
    pub directors: Vec<RankingEntry>,
    pub companies: Vec<RankingEntry>,
    pub languages: Vec<RankingEntry>,
    pub cross_role: Vec<RankingEntry>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    ToggleTheme,
    Tick,

    StatsLoaded(Result<ApiEnvelope<StatsSummary>, ApiError>),
    RandomLoaded(Result<ApiEnvelope<Vec<Movie>>, ApiError>),
    YearsLoaded(Result<ApiEnvelope<Vec<YearCount>>, ApiError>),
    SearchQueryChanged(String),
    SearchSubmit,
    SearchLoaded(Result<ApiEnvelope<Vec<Movie>>, ApiError>),
    SelectMovie(Movie),
    SimilarLoaded(Result<ApiEnvelope<Vec<Movie>>, ApiError>),

    ChartsLoaded(Result<Charts, ApiError>),
    RankingsLoaded(Result<Rankings, ApiError>),
    ActorQueryChanged(String),
    ActorSubmit,
    ActorNetworkLoaded(Result<ApiEnvelope<ActorNetwork>, ApiError>),

    ImportPathChanged(String),
    ImportRequested,
    ImportConfirmed(bool),
    ImportFinished(Result<ImportResult, ApiError>),

    ResolveDialog(DialogOutcome),
    DismissToast(u64),
    HoverNotification(u64, bool),
}

pub struct Dashboard {
    pub route: Route,
    pub settings: AppSettings,
    pub os_prefers_dark: bool,
    pub api: Option<Api>,
    pub notifier: Notifier,

    pub stats: Option<StatsSummary>,
    pub random_movies: Vec<Movie>,
    pub years: Vec<YearCount>,
    pub search_query: String,
    pub search_results: Vec<Movie>,
    pub search_total: Option<u64>,
    pub selected_movie: Option<Movie>,
    pub similar_movies: Vec<Movie>,

    pub charts: Option<Charts>,
    pub rankings: Option<Rankings>,
    pub actor_query: String,
    pub actor_network: Option<ActorNetwork>,

    pub import_path: String,
    pub import_progress: Arc<ImportProgress>,
    pub import_in_flight: bool,
    pub last_import: Option<ImportResult>,
}

impl Dashboard {
    fn new() -> (Self, Task<Message>) {
        let settings = AppSettings::load();
        info!("Using backend at {}", settings.api_base_url);

        let mut notifier = Notifier::new();
        let api = match ApiClient::from_settings(&settings) {
            Ok(client) => Some(Api::new(client)),
            Err(e) => {
                error!("Could not build the HTTP client: {}", e);
                notifier.notify("Backend unavailable", e.to_string(), MessageKind::Error);
                None
            }
        };

        let mut app = Self {
            route: Route::Home,
            settings,
            os_prefers_dark: false,
            api,
            notifier,
            stats: None,
            random_movies: Vec::new(),
            years: Vec::new(),
            search_query: String::new(),
            search_results: Vec::new(),
            search_total: None,
            selected_movie: None,
            similar_movies: Vec::new(),
            charts: None,
            rankings: None,
            actor_query: String::from("Tom Hanks"),
            actor_network: None,
            import_path: String::new(),
            import_progress: Arc::new(ImportProgress::default()),
            import_in_flight: false,
            last_import: None,
        };
        let task = handlers::load_route(&mut app, Route::Home);
        (app, task)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        let vars = self.vars();
        let main_content = container(self.view_main_content())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(token_color(vars.bg_color))),
                text_color: Some(token_color(vars.text_color)),
                ..Default::default()
            });

        let with_toasts = iced::widget::stack![main_content, self.view_feedback_layer()]
            .width(Length::Fill)
            .height(Length::Fill);

        if self.notifier.dialog().is_some() {
            return iced::widget::stack![with_toasts, self.view_dialog_overlay()]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        with_toasts.into()
    }

    fn theme(&self) -> Theme {
        self.settings.theme_preference.iced_theme(self.os_prefers_dark)
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.notifier.is_active() || self.import_in_flight {
            iced::time::every(TICK_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.settings.theme_preference
    }

    pub fn vars(&self) -> ThemeVars {
        self.theme_mode().vars(self.os_prefers_dark)
    }

    pub fn is_dark(&self) -> bool {
        self.theme_mode().is_dark(self.os_prefers_dark)
    }

    pub fn report(&mut self, title: &str, err: &ApiError) {
        self.notifier.error_loading();
        self.notifier.notify(title, err.to_string(), MessageKind::Error);
    }
}

/// Resolves a theme token (or literal hex color) to an `iced` color.
pub fn token_color(token: &str) -> Color {
    let hex = filmdash::theme::token_hex(token).unwrap_or(token);
    match hex_rgb(hex) {
        Some((r, g, b)) => Color::from_rgb8(r, g, b),
        None => Color::from_rgb8(0x80, 0x80, 0x80),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "filmdash=info".into()))
        .with(fmt::layer())
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    iced::application(Dashboard::new, Dashboard::update, Dashboard::view)
        .title("Movie Dashboard")
        .theme(Dashboard::theme)
        .window_size(Size::new(1280.0, 800.0))
        .subscription(Dashboard::subscription)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_progress_tracks_latest_report() {
        let progress = ImportProgress::default();
        progress.record(UploadProgress {
            loaded: 64,
            total: 256,
        });
        assert_eq!(progress.snapshot().fraction(), 0.25);
        progress.reset();
        assert_eq!(progress.snapshot(), UploadProgress { loaded: 0, total: 0 });
    }

    #[test]
    fn token_colors_resolve() {
        assert_eq!(token_color("bg-white"), Color::from_rgb8(0xff, 0xff, 0xff));
        assert_eq!(token_color("#0072F5"), Color::from_rgb8(0x00, 0x72, 0xf5));
    }
}
