use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use iced::Task;
use tracing::{info, warn};

use filmdash::api::movies::{
    DEFAULT_RANDOM_COUNT, DEFAULT_RANDOM_MIN_RATING, DEFAULT_SIMILAR_LIMIT,
};
use filmdash::api::visualization::{
    ActorNetworkParams, BudgetRevenueParams, RankingParams, RuntimeParams, YearlyTrendParams,
};
use filmdash::api::{CsvUpload, ImportResult, ProgressCallback, UploadProgress};
use filmdash::config::PAGINATION;
use filmdash::movie::Movie;
use filmdash::notify::MessageKind;
use filmdash::routes::Route;
use filmdash::{Api, ApiError};

use crate::{Charts, Dashboard, Message, Rankings};

const RATING_BUCKET_SIZE: f32 = 0.5;

pub fn handle_message(app: &mut Dashboard, message: Message) -> Task<Message> {
    match message {
        Message::Navigate(route) => handle_navigate(app, route),
        Message::ToggleTheme => handle_toggle_theme(app),
        Message::Tick => {
            app.notifier.tick(Instant::now());
            Task::none()
        }
        Message::StatsLoaded(result) => {
            match result {
                Ok(envelope) => {
                    app.stats = Some(envelope.data);
                    app.notifier.finish_loading();
                }
                Err(e) => app.report("Could not load statistics", &e),
            }
            Task::none()
        }
        Message::RandomLoaded(result) => {
            match result {
                Ok(envelope) => app.random_movies = envelope.data,
                Err(e) => app.report("Could not load recommendations", &e),
            }
            Task::none()
        }
        Message::YearsLoaded(result) => {
            match result {
                Ok(envelope) => app.years = envelope.data,
                Err(e) => app.report("Could not load yearly counts", &e),
            }
            Task::none()
        }
        Message::SearchQueryChanged(query) => {
            app.search_query = query;
            Task::none()
        }
        Message::SearchSubmit => handle_search_submit(app),
        Message::SearchLoaded(result) => handle_search_loaded(app, result),
        Message::SelectMovie(movie) => handle_select_movie(app, movie),
        Message::SimilarLoaded(result) => {
            match result {
                Ok(envelope) => app.similar_movies = envelope.data,
                Err(e) => app.report("Could not load similar movies", &e),
            }
            Task::none()
        }
        Message::ChartsLoaded(result) => {
            match result {
                Ok(charts) => {
                    app.charts = Some(charts);
                    app.notifier.finish_loading();
                }
                Err(e) => app.report("Could not load charts", &e),
            }
            Task::none()
        }
        Message::RankingsLoaded(result) => {
            match result {
                Ok(rankings) => {
                    app.rankings = Some(rankings);
                    app.notifier.finish_loading();
                }
                Err(e) => app.report("Could not load rankings", &e),
            }
            Task::none()
        }
        Message::ActorQueryChanged(query) => {
            app.actor_query = query;
            Task::none()
        }
        Message::ActorSubmit => load_actor_network(app),
        Message::ActorNetworkLoaded(result) => {
            match result {
                Ok(envelope) => {
                    app.actor_network = Some(envelope.data);
                    app.notifier.finish_loading();
                }
                Err(e) => app.report("Could not load the actor network", &e),
            }
            Task::none()
        }
        Message::ImportPathChanged(path) => {
            app.import_path = path;
            Task::none()
        }
        Message::ImportRequested => handle_import_requested(app),
        Message::ImportConfirmed(confirmed) => handle_import_confirmed(app, confirmed),
        Message::ImportFinished(result) => handle_import_finished(app, result),
        Message::ResolveDialog(outcome) => {
            app.notifier.resolve_dialog(outcome);
            Task::none()
        }
        Message::DismissToast(id) => {
            app.notifier.dismiss(id);
            Task::none()
        }
        Message::HoverNotification(id, hovered) => {
            app.notifier.set_hovered(id, hovered);
            Task::none()
        }
    }
}

fn handle_navigate(app: &mut Dashboard, route: Route) -> Task<Message> {
    if app.route == route {
        return Task::none();
    }
    info!("Navigating to {} ({})", route.path(), route.name());
    app.route = route;
    load_route(app, route)
}

/// Fetches whatever `route` shows that has not been loaded yet.
pub fn load_route(app: &mut Dashboard, route: Route) -> Task<Message> {
    let Some(api) = app.api.clone() else {
        return Task::none();
    };

    match route {
        Route::Home if app.stats.is_none() => {
            app.notifier.start_loading();
            let stats_api = api.clone();
            let random_api = api.clone();
            Task::batch([
                Task::perform(
                    async move { stats_api.movies.get_stats().await },
                    Message::StatsLoaded,
                ),
                Task::perform(
                    async move {
                        random_api
                            .movies
                            .get_random_movies(DEFAULT_RANDOM_COUNT, DEFAULT_RANDOM_MIN_RATING)
                            .await
                    },
                    Message::RandomLoaded,
                ),
                Task::perform(
                    async move { api.movies.get_movies_by_year().await },
                    Message::YearsLoaded,
                ),
            ])
        }
        Route::Visualization if app.charts.is_none() => {
            app.notifier.start_loading();
            Task::perform(load_charts(api), Message::ChartsLoaded)
        }
        Route::AdvancedVisualization if app.rankings.is_none() => {
            app.notifier.start_loading();
            Task::perform(load_rankings(api), Message::RankingsLoaded)
        }
        Route::ActorNetwork if app.actor_network.is_none() => load_actor_network(app),
        _ => Task::none(),
    }
}

async fn load_charts(api: Api) -> Result<Charts, ApiError> {
    let viz = &api.visualization;
    let budget_params = BudgetRevenueParams::default();
    let runtime_params = RuntimeParams::default();
    let trend_params = YearlyTrendParams::default();
    let (budget_revenue, runtime, ratings, trends) = futures::try_join!(
        viz.budget_revenue(&budget_params),
        viz.runtime_distribution(&runtime_params),
        viz.rating_distribution(RATING_BUCKET_SIZE),
        viz.yearly_trends(&trend_params),
    )?;
    Ok(Charts {
        budget_revenue: budget_revenue.data,
        runtime: runtime.data,
        ratings: ratings.data,
        trends: trends.data,
    })
}

async fn load_rankings(api: Api) -> Result<Rankings, ApiError> {
    let viz = &api.visualization;
    let director_params = RankingParams::directors();
    let company_params = RankingParams::production_companies();
    let language_params = RankingParams::languages();
    let crew_params = RankingParams::crew();
    let (directors, companies, languages, cross_role) = futures::try_join!(
        viz.top_directors(&director_params),
        viz.top_production_companies(&company_params),
        viz.language_distribution(&language_params),
        viz.cross_role_talents(&crew_params),
    )?;
    Ok(Rankings {
        directors: directors.data,
        companies: companies.data,
        languages: languages.data,
        cross_role: cross_role.data,
    })
}

fn load_actor_network(app: &mut Dashboard) -> Task<Message> {
    let actor = app.actor_query.trim().to_string();
    if actor.is_empty() {
        app.notifier.message("Enter an actor name", MessageKind::Warning);
        return Task::none();
    }
    let Some(api) = app.api.clone() else {
        return Task::none();
    };

    app.notifier.start_loading();
    let params = ActorNetworkParams::for_actor(actor);
    Task::perform(
        async move { api.visualization.actor_network(&params).await },
        Message::ActorNetworkLoaded,
    )
}

fn handle_toggle_theme(app: &mut Dashboard) -> Task<Message> {
    let next = app.settings.theme_preference.toggled(app.os_prefers_dark);
    info!("Switching theme to {}", next);
    app.settings.theme_preference = next;
    if let Err(e) = app.settings.save() {
        warn!("Theme preference not saved: {}", e);
        app.notifier.message("Theme preference could not be saved", MessageKind::Warning);
    }
    Task::none()
}

fn handle_search_submit(app: &mut Dashboard) -> Task<Message> {
    let query = app.search_query.trim().to_string();
    if query.is_empty() {
        app.search_results.clear();
        app.search_total = None;
        return Task::none();
    }
    let Some(api) = app.api.clone() else {
        return Task::none();
    };

    app.notifier.start_loading();
    Task::perform(
        async move {
            api.movies
                .search_movies(&query, PAGINATION.default_page, PAGINATION.default_page_size)
                .await
        },
        Message::SearchLoaded,
    )
}

fn handle_search_loaded(
    app: &mut Dashboard,
    result: Result<filmdash::movie::ApiEnvelope<Vec<Movie>>, ApiError>,
) -> Task<Message> {
    match result {
        Ok(envelope) => {
            app.search_total = envelope.total();
            app.search_results = envelope.data;
            app.notifier.finish_loading();
            if app.search_results.is_empty() {
                app.notifier.message("No movies found", MessageKind::Info);
            }
        }
        Err(e) => app.report("Search failed", &e),
    }
    Task::none()
}

fn handle_select_movie(app: &mut Dashboard, movie: Movie) -> Task<Message> {
    let Some(api) = app.api.clone() else {
        return Task::none();
    };
    let id = movie.id.clone();
    app.selected_movie = Some(movie);
    app.similar_movies.clear();
    Task::perform(
        async move {
            api.movies.get_similar_movies(&id, DEFAULT_SIMILAR_LIMIT).await
        },
        Message::SimilarLoaded,
    )
}

fn handle_import_requested(app: &mut Dashboard) -> Task<Message> {
    let path = app.import_path.trim();
    if path.is_empty() {
        app.notifier.message("Choose a CSV file to import", MessageKind::Warning);
        return Task::none();
    }
    if app.import_in_flight {
        return Task::none();
    }

    let answer = app.notifier.confirm_with(
        "Import movies",
        format!("Upload {} to the movie database?", path),
        "Import",
        "Cancel",
    );
    Task::perform(answer, Message::ImportConfirmed)
}

fn handle_import_confirmed(app: &mut Dashboard, confirmed: bool) -> Task<Message> {
    if !confirmed {
        return Task::none();
    }
    let Some(api) = app.api.clone() else {
        return Task::none();
    };

    let path = PathBuf::from(app.import_path.trim());
    app.import_in_flight = true;
    app.import_progress.reset();
    app.notifier.start_loading();

    let progress = Arc::clone(&app.import_progress);
    let callback: ProgressCallback = Arc::new(move |p: UploadProgress| progress.record(p));
    Task::perform(
        async move {
            let upload = CsvUpload::from_path(&path).await?;
            api.import.upload_csv(upload, Some(callback)).await
        },
        Message::ImportFinished,
    )
}

fn handle_import_finished(
    app: &mut Dashboard,
    result: Result<ImportResult, ApiError>,
) -> Task<Message> {
    app.import_in_flight = false;
    match result {
        Ok(result) => {
            let summary = result
                .message
                .clone()
                .unwrap_or_else(|| String::from("Import finished"));
            let kind = if result.success == Some(false) {
                MessageKind::Warning
            } else {
                MessageKind::Success
            };
            app.notifier.message(summary, kind);
            app.notifier.finish_loading();
            app.last_import = Some(result);
            // Counts and charts change after an import.
            app.stats = None;
            app.charts = None;
            app.rankings = None;
        }
        Err(e) => app.report("Import failed", &e),
    }
    Task::none()
}
