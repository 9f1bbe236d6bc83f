use iced::widget::{
    button, column, container, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use filmdash::config::CHART_COLORS;
use filmdash::movie::Movie;
use filmdash::notify::{DialogOutcome, LoadingBar, MessageKind};
use filmdash::routes::Route;
use filmdash::theme::{ChartTheme, ColorGroup, ThemeOverrides};
use filmdash::visualization::{RankingEntry, RuntimeBucket};

use crate::{token_color, Dashboard, Message};

const CONTENT_WIDTH: f32 = 960.0;
const BAR_WIDTH: f32 = 420.0;
const DIALOG_WIDTH: f32 = 420.0;
const LOADING_BAR_HEIGHT: f32 = 3.0;

fn bold() -> iced::Font {
    iced::Font {
        weight: iced::font::Weight::Bold,
        ..Default::default()
    }
}

fn kind_group(overrides: &ThemeOverrides, kind: MessageKind) -> ColorGroup {
    match kind {
        MessageKind::Success => overrides.success,
        MessageKind::Info => overrides.info,
        MessageKind::Warning => overrides.warning,
        MessageKind::Error => overrides.error,
    }
}

/// Horizontal bar scaled against `max`.
fn bar_row<'a>(
    label: String,
    value: f64,
    max: f64,
    color: Color,
    caption: String,
) -> Element<'a, Message> {
    let fraction = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (BAR_WIDTH * fraction as f32).max(1.0);
    let bar = container(Space::new().width(Length::Fixed(filled)).height(14))
        .width(Length::Fixed(filled))
        .style(move |_theme| container::Style {
            background: Some(iced::Background::Color(color)),
            border: Border {
                radius: 3.0.into(),
                ..Default::default()
            },
            ..Default::default()
        });

    row![
        text(label).size(13).width(Length::Fixed(180.0)),
        container(bar).width(Length::Fixed(BAR_WIDTH)),
        text(caption).size(13),
    ]
    .spacing(12)
    .align_y(iced::Alignment::Center)
    .into()
}

fn meter<'a>(fraction: f32, width: f32, fill: Color, track: Color) -> Element<'a, Message> {
    let filled = width * fraction.clamp(0.0, 1.0);
    let inner = container(Space::new().width(Length::Fixed(filled)).height(8))
        .style(move |_theme| container::Style {
            background: Some(iced::Background::Color(fill)),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        });
    container(inner)
        .width(Length::Fixed(width))
        .style(move |_theme| container::Style {
            background: Some(iced::Background::Color(track)),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

impl Dashboard {
    fn overrides(&self) -> ThemeOverrides {
        ThemeOverrides::for_mode(self.is_dark())
    }

    fn card<'a>(&self, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
        let vars = self.vars();
        let background = token_color(vars.card_bg_color);
        let border = token_color(vars.border_color);
        let radius = self.overrides().card_radius;
        container(content)
            .padding(16)
            .width(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(background)),
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: radius.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn section_title<'a>(&self, label: impl Into<String>) -> Element<'a, Message> {
        text(label.into())
            .size(20)
            .font(bold())
            .color(token_color(self.vars().text_color))
            .into()
    }

    fn secondary<'a>(&self, content: impl Into<String>) -> Element<'a, Message> {
        text(content.into())
            .size(13)
            .color(token_color(self.vars().secondary_color))
            .into()
    }

    fn primary_button<'a>(
        &self,
        label: &'a str,
        on_press: Option<Message>,
    ) -> Element<'a, Message> {
        let group = self.overrides().primary;
        let radius = self.overrides().button_radius_medium;
        let label_color = self
            .overrides()
            .button_text_primary
            .map(token_color)
            .unwrap_or(Color::WHITE);
        button(text(label).size(14))
            .padding(Padding::new(8.0).left(16.0).right(16.0))
            .style(move |_theme, status| {
                let fill = match status {
                    button::Status::Hovered => group.hover,
                    button::Status::Pressed => group.pressed,
                    button::Status::Disabled => group.suppl,
                    _ => group.base,
                };
                button::Style {
                    background: Some(iced::Background::Color(token_color(fill))),
                    text_color: label_color,
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: radius.into(),
                    },
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press_maybe(on_press)
            .into()
    }

    fn plain_button<'a>(
        &self,
        content: impl Into<Element<'a, Message>>,
        on_press: Message,
    ) -> Element<'a, Message> {
        let vars = self.vars();
        let text_color = token_color(vars.text_color);
        let hover = token_color(vars.hover_color);
        let radius = self.overrides().button_radius_small;
        button(content)
            .padding(Padding::new(6.0).left(10.0).right(10.0))
            .style(move |_theme, status| button::Style {
                background: Some(iced::Background::Color(match status {
                    button::Status::Hovered | button::Status::Pressed => hover,
                    _ => Color::TRANSPARENT,
                })),
                text_color,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: radius.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(on_press)
            .into()
    }

    fn input<'a>(
        &self,
        placeholder: &'a str,
        value: &'a str,
        on_input: fn(String) -> Message,
        on_submit: Message,
    ) -> Element<'a, Message> {
        let vars = self.vars();
        let border = token_color(vars.border_color);
        let value_color = token_color(vars.text_color);
        let placeholder_color = token_color(vars.secondary_color);
        let selection = token_color(self.overrides().primary.suppl);
        let radius = self.overrides().input_radius;
        text_input(placeholder, value)
            .on_input(on_input)
            .on_submit(on_submit)
            .padding(8)
            .width(Length::Fixed(360.0))
            .style(move |_theme, _status| text_input::Style {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: radius.into(),
                },
                icon: placeholder_color,
                placeholder: placeholder_color,
                value: value_color,
                selection,
            })
            .into()
    }

    pub fn view_main_content(&self) -> Element<'_, Message> {
        let page = match self.route {
            Route::Home => self.view_home(),
            Route::About => self.view_about(),
            Route::Import => self.view_import(),
            Route::Visualization => self.view_visualization(),
            Route::ActorNetwork => self.view_actor_network(),
            Route::AdvancedVisualization => self.view_advanced(),
        };

        let body = container(page)
            .max_width(CONTENT_WIDTH)
            .padding(Padding::new(24.0).left(48.0).right(48.0));

        column![
            self.view_header(),
            scrollable(container(body).center_x(Length::Fill)).height(Length::Fill),
        ]
        .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let vars = self.vars();
        let active = token_color(vars.primary_color);
        let idle = token_color(vars.secondary_color);
        let border = token_color(vars.border_color);

        let nav: Vec<Element<Message>> = Route::ALL
            .into_iter()
            .map(|route| {
                let is_active = route == self.route;
                button(text(route.title()).size(15))
                    .padding(Padding::new(6.0).left(12.0).right(12.0))
                    .style(move |_theme, status| button::Style {
                        background: Some(iced::Background::Color(Color::TRANSPARENT)),
                        text_color: match (is_active, status) {
                            (true, _) | (_, button::Status::Hovered) => active,
                            _ => idle,
                        },
                        border: Border::default(),
                        shadow: Shadow::default(),
                        snap: false,
                    })
                    .on_press(Message::Navigate(route))
                    .into()
            })
            .collect();

        let theme_label = if self.is_dark() { "Light mode" } else { "Dark mode" };
        let header = row![
            text("Movie Dashboard").size(22).font(bold()).color(active),
            Space::new().width(24),
            Row::with_children(nav).spacing(4),
            Space::new().width(Length::Fill),
            self.plain_button(text(theme_label).size(14), Message::ToggleTheme),
        ]
        .align_y(iced::Alignment::Center)
        .padding(Padding::new(12.0).left(48.0).right(48.0));

        container(header)
            .width(Length::Fill)
            .style(move |_theme| container::Style {
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn view_home(&self) -> Element<'_, Message> {
        let search = row![
            self.input(
                "Search movies by title...",
                &self.search_query,
                Message::SearchQueryChanged,
                Message::SearchSubmit,
            ),
            self.primary_button("Search", Some(Message::SearchSubmit)),
        ]
        .spacing(12);

        let mut page =
            column![self.section_title("Overview"), self.view_stats(), search].spacing(20);

        if !self.search_results.is_empty() {
            let heading = match self.search_total {
                Some(total) => format!("Search results ({} total)", total),
                None => String::from("Search results"),
            };
            page = page
                .push(self.section_title(heading))
                .push(self.view_movie_list(&self.search_results));
        }

        if let Some(movie) = &self.selected_movie {
            page = page.push(self.view_movie_detail(movie));
        }

        if !self.random_movies.is_empty() {
            page = page
                .push(self.section_title("Recommended for you"))
                .push(self.view_movie_list(&self.random_movies));
        }

        if !self.years.is_empty() {
            page = page
                .push(self.section_title("Releases per year"))
                .push(self.view_year_counts());
        }

        page.into()
    }

    fn view_stats(&self) -> Element<'_, Message> {
        let Some(stats) = &self.stats else {
            return self.secondary("Loading statistics...");
        };

        let tile = |label: &str, value: String, detail: Option<String>| {
            let mut content = column![
                self.secondary(label.to_string()),
                text(value).size(24).font(bold()),
            ]
            .spacing(4);
            if let Some(detail) = detail {
                content = content.push(self.secondary(detail));
            }
            self.card(content)
        };

        row![
            tile("Movies", stats.total_movies.to_string(), None),
            tile("Average rating", stats.avg_rating.clone(), None),
            tile(
                "Highest rated",
                stats
                    .highest_rated
                    .as_ref()
                    .map(|m| m.title.clone())
                    .unwrap_or_default(),
                stats
                    .highest_rated
                    .as_ref()
                    .and_then(|m| m.vote_average.clone()),
            ),
            tile(
                "Most popular",
                stats
                    .most_popular
                    .as_ref()
                    .map(|m| m.title.clone())
                    .unwrap_or_default(),
                stats
                    .most_popular
                    .as_ref()
                    .and_then(|m| m.vote_count.as_ref().map(|c| format!("{} votes", c))),
            ),
            tile(
                "Longest",
                stats
                    .longest_movie
                    .as_ref()
                    .map(|m| m.title.clone())
                    .unwrap_or_default(),
                stats
                    .longest_movie
                    .as_ref()
                    .and_then(|m| m.runtime.as_ref().map(|r| format!("{} min", r))),
            ),
        ]
        .spacing(12)
        .into()
    }

    fn view_movie_list<'a>(&'a self, movies: &'a [Movie]) -> Element<'a, Message> {
        let rows: Vec<Element<Message>> = movies
            .iter()
            .map(|movie| {
                let year = movie
                    .year()
                    .map(|y| format!(" ({})", y))
                    .unwrap_or_default();
                let rating = movie
                    .vote_average
                    .map(|r| format!("{:.1}", r))
                    .unwrap_or_else(|| String::from("-"));
                let line = row![
                    text(format!("{}{}", movie.title, year))
                        .size(15)
                        .width(Length::Fill),
                    text(movie.genres.joined(", ")).size(13).width(Length::Fixed(260.0)),
                    text(rating).size(13),
                ]
                .spacing(12);
                self.plain_button(line, Message::SelectMovie(movie.clone()))
            })
            .collect();
        self.card(Column::with_children(rows).spacing(2))
    }

    fn view_movie_detail<'a>(&'a self, movie: &'a Movie) -> Element<'a, Message> {
        let mut content = column![text(&movie.title).size(22).font(bold())].spacing(8);

        if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
            content = content.push(self.secondary(tagline));
        }
        if let Some(overview) = &movie.overview {
            content = content.push(text(overview).size(14));
        }

        let facts = [
            ("Directors", movie.directors.joined(", ")),
            ("Cast", movie.cast.joined(", ")),
            ("Genres", movie.genres.joined(", ")),
            ("Studios", movie.production_companies.joined(", ")),
            ("IMDb", movie.imdb_id.clone().unwrap_or_default()),
            ("ROI", movie.roi().map(|r| format!("{:.2}x", r)).unwrap_or_default()),
        ];
        for (label, value) in facts.into_iter().filter(|(_, v)| !v.is_empty()) {
            content = content.push(
                row![
                    text(label).size(13).font(bold()).width(Length::Fixed(90.0)),
                    text(value).size(13),
                ]
                .spacing(8),
            );
        }

        if !self.similar_movies.is_empty() {
            let similar: Vec<String> =
                self.similar_movies.iter().map(|m| m.title.clone()).collect();
            content = content
                .push(Space::new().height(8))
                .push(self.secondary(format!("Similar: {}", similar.join(" · "))));
        }

        self.card(content)
    }

    fn view_year_counts(&self) -> Element<'_, Message> {
        let recent: Vec<_> = self.years.iter().rev().take(12).collect();
        let max = recent.iter().map(|y| y.count).max().unwrap_or(0) as f64;
        let color = token_color(CHART_COLORS.primary);
        let rows: Vec<Element<Message>> = recent
            .into_iter()
            .map(|y| bar_row(y.year.to_string(), y.count as f64, max, color, y.count.to_string()))
            .collect();
        self.card(Column::with_children(rows).spacing(6))
    }

    fn view_about(&self) -> Element<'_, Message> {
        column![
            self.section_title("About"),
            text("Browse, search and chart a movie catalogue served by the dashboard backend.")
                .size(15),
            self.secondary(format!("Backend: {}", self.settings.api_base_url)),
            self.secondary(format!("Theme: {}", self.theme_mode())),
        ]
        .spacing(12)
        .into()
    }

    fn view_import(&self) -> Element<'_, Message> {
        let submit = (!self.import_in_flight).then_some(Message::ImportRequested);
        let mut page = column![
            self.section_title("Import movies"),
            self.secondary("Upload a CSV export to add movies to the catalogue."),
            row![
                self.input(
                    "/path/to/movies.csv",
                    &self.import_path,
                    Message::ImportPathChanged,
                    Message::ImportRequested,
                ),
                self.primary_button("Import", submit),
            ]
            .spacing(12),
        ]
        .spacing(16);

        if self.import_in_flight {
            let progress = self.import_progress.snapshot();
            let fraction = progress.fraction();
            let chart = ChartTheme::for_mode(self.is_dark());
            let track = token_color(self.vars().border_color);
            page = page.push(
                column![
                    meter(fraction, BAR_WIDTH, token_color(chart.gauge_color(fraction)), track),
                    self.secondary(format!(
                        "{:.0}% ({} of {} bytes)",
                        fraction * 100.0,
                        progress.loaded,
                        progress.total
                    )),
                ]
                .spacing(6),
            );
        }

        if let Some(result) = &self.last_import {
            let mut summary = column![text(
                result
                    .message
                    .clone()
                    .unwrap_or_else(|| String::from("Import finished"))
            )
            .size(15)]
            .spacing(4);
            for (key, value) in &result.extra {
                summary = summary.push(self.secondary(format!("{}: {}", key, value)));
            }
            page = page.push(self.card(summary));
        }

        page.into()
    }

    fn view_visualization(&self) -> Element<'_, Message> {
        let Some(charts) = &self.charts else {
            return column![
                self.section_title("Visualization"),
                self.secondary("Loading charts...")
            ]
            .spacing(12)
            .into();
        };

        let budget_max = charts
            .budget_revenue
            .iter()
            .map(|b| b.movie_count)
            .max()
            .unwrap_or(0) as f64;
        let budget_rows: Vec<Element<Message>> = charts
            .budget_revenue
            .iter()
            .enumerate()
            .map(|(i, b)| {
                bar_row(
                    format!("{} - {}", b.budget_bucket, b.budget_bucket_end),
                    b.movie_count as f64,
                    budget_max,
                    token_color(CHART_COLORS.series(i)),
                    format!("{} movies, ROI {}", b.movie_count, b.avg_roi),
                )
            })
            .collect();

        let trend_max = charts
            .trends
            .iter()
            .map(|t| t.movie_count)
            .max()
            .unwrap_or(0) as f64;
        let trend_color = token_color(CHART_COLORS.success);
        let trend_rows: Vec<Element<Message>> = charts
            .trends
            .iter()
            .map(|t| {
                let rating = t.avg_rating.map(|r| format!(", avg {:.1}", r)).unwrap_or_default();
                bar_row(
                    t.year.to_string(),
                    t.movie_count as f64,
                    trend_max,
                    trend_color,
                    format!("{}{}", t.movie_count, rating),
                )
            })
            .collect();

        column![
            self.section_title("Budget vs. revenue"),
            self.card(Column::with_children(budget_rows).spacing(6)),
            self.section_title("Runtime distribution"),
            self.view_buckets(&charts.runtime, " min", CHART_COLORS.primary),
            self.section_title("Rating distribution"),
            self.view_buckets(&charts.ratings, "", CHART_COLORS.secondary),
            self.section_title("Yearly trends"),
            self.card(Column::with_children(trend_rows).spacing(6)),
        ]
        .spacing(16)
        .into()
    }

    fn view_buckets<'a>(
        &self,
        buckets: &'a [RuntimeBucket],
        unit: &str,
        color: &str,
    ) -> Element<'a, Message> {
        let max = buckets.iter().map(|b| b.movie_count).max().unwrap_or(0) as f64;
        let color = token_color(color);
        let rows: Vec<Element<Message>> = buckets
            .iter()
            .map(|b| {
                bar_row(
                    format!("{} - {}{}", b.bucket_start, b.bucket_end, unit),
                    b.movie_count as f64,
                    max,
                    color,
                    b.movie_count.to_string(),
                )
            })
            .collect();
        self.card(Column::with_children(rows).spacing(6))
    }

    fn view_actor_network(&self) -> Element<'_, Message> {
        let mut page = column![
            self.section_title("Actor network"),
            row![
                self.input(
                    "Actor name",
                    &self.actor_query,
                    Message::ActorQueryChanged,
                    Message::ActorSubmit,
                ),
                self.primary_button("Show", Some(Message::ActorSubmit)),
            ]
            .spacing(12),
        ]
        .spacing(16);

        let Some(network) = &self.actor_network else {
            return page.into();
        };
        let Some(center) = network.nodes.iter().max_by_key(|n| n.value) else {
            return page.push(self.secondary("No collaborations found")).into();
        };

        let collaborators = network.collaborators(&center.id);
        let max = collaborators.first().map(|(_, w)| *w).unwrap_or(0) as f64;
        let rows: Vec<Element<Message>> = collaborators
            .into_iter()
            .map(|(node, weight)| {
                let color = token_color(CHART_COLORS.series(node.category));
                let category = network.category_name(node).unwrap_or_default();
                bar_row(
                    node.name.clone(),
                    weight as f64,
                    max,
                    color,
                    format!("{} films {}", weight, category),
                )
            })
            .collect();

        page = page
            .push(self.secondary(format!(
                "{}: {} actors, {} collaborations",
                center.name,
                network.nodes.len(),
                network.links.len()
            )))
            .push(self.card(Column::with_children(rows).spacing(6)));
        page.into()
    }

    fn view_advanced(&self) -> Element<'_, Message> {
        let Some(rankings) = &self.rankings else {
            return column![self.section_title("Advanced"), self.secondary("Loading rankings...")]
                .spacing(12)
                .into();
        };

        column![
            self.section_title("Top directors"),
            self.view_ranking(&rankings.directors, 0),
            self.section_title("Top production companies"),
            self.view_ranking(&rankings.companies, 2),
            self.section_title("Languages"),
            self.view_ranking(&rankings.languages, 4),
            self.section_title("Cross-role talents"),
            self.view_ranking(&rankings.cross_role, 6),
        ]
        .spacing(16)
        .into()
    }

    fn view_ranking<'a>(&self, entries: &'a [RankingEntry], series: usize) -> Element<'a, Message> {
        let max = entries.iter().map(|e| e.movie_count).max().unwrap_or(0) as f64;
        let color = token_color(CHART_COLORS.series(series));
        let rows: Vec<Element<Message>> = entries
            .iter()
            .map(|e| {
                let rating = e.avg_rating.map(|r| format!(", avg {:.1}", r)).unwrap_or_default();
                bar_row(
                    e.name.clone(),
                    e.movie_count as f64,
                    max,
                    color,
                    format!("{} movies{}", e.movie_count, rating),
                )
            })
            .collect();
        self.card(Column::with_children(rows).spacing(6))
    }

    /// Loading bar, toasts and notifications drawn above the page.
    pub fn view_feedback_layer(&self) -> Element<'_, Message> {
        let overrides = self.overrides();
        let card_bg = token_color(self.vars().card_bg_color);
        let text_color = token_color(self.vars().text_color);

        let loading_color = match self.notifier.loading() {
            LoadingBar::Idle => None,
            LoadingBar::Loading { .. } | LoadingBar::Finished { .. } => {
                Some(token_color(overrides.primary.base))
            }
            LoadingBar::Failed { .. } => Some(token_color(overrides.error.base)),
        };
        let loading_bar: Element<Message> = match loading_color {
            Some(color) => container(Space::new().width(Length::Fill).height(LOADING_BAR_HEIGHT))
                .width(Length::Fill)
                .style(move |_theme| container::Style {
                    background: Some(iced::Background::Color(color)),
                    ..Default::default()
                })
                .into(),
            None => Space::new().height(LOADING_BAR_HEIGHT).into(),
        };

        let toasts: Vec<Element<Message>> = self
            .notifier
            .toasts()
            .iter()
            .map(|toast| {
                let accent = token_color(kind_group(&overrides, toast.kind).base);
                let body = container(text(&toast.content).size(14).color(Color::WHITE))
                    .padding(Padding::new(8.0).left(16.0).right(16.0))
                    .style(move |_theme| container::Style {
                        background: Some(iced::Background::Color(accent)),
                        border: Border {
                            radius: 6.0.into(),
                            ..Default::default()
                        },
                        shadow: Shadow {
                            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
                            offset: iced::Vector::new(0.0, 4.0),
                            blur_radius: 8.0,
                        },
                        ..Default::default()
                    });
                iced::widget::mouse_area(body)
                    .on_press(Message::DismissToast(toast.id))
                    .into()
            })
            .collect();

        let notifications: Vec<Element<Message>> = self
            .notifier
            .notifications()
            .iter()
            .map(|n| {
                let accent = token_color(kind_group(&overrides, n.kind).base);
                let body = column![
                    row![
                        text(&n.title).size(15).font(bold()).color(accent).width(Length::Fill),
                        self.plain_button(text("x").size(13), Message::DismissToast(n.id)),
                    ]
                    .align_y(iced::Alignment::Center),
                    text(&n.content).size(13).color(text_color),
                ]
                .spacing(4);
                let panel = container(body)
                    .padding(12)
                    .width(Length::Fixed(320.0))
                    .style(move |_theme| container::Style {
                        background: Some(iced::Background::Color(card_bg)),
                        border: Border {
                            color: accent,
                            width: 1.0,
                            radius: 8.0.into(),
                        },
                        shadow: Shadow {
                            color: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
                            offset: iced::Vector::new(0.0, 6.0),
                            blur_radius: 12.0,
                        },
                        ..Default::default()
                    });
                iced::widget::mouse_area(panel)
                    .on_enter(Message::HoverNotification(n.id, true))
                    .on_exit(Message::HoverNotification(n.id, false))
                    .into()
            })
            .collect();

        let toast_column = container(Column::with_children(toasts).spacing(8))
            .center_x(Length::Fill)
            .padding(Padding::new(64.0).bottom(0.0));
        let notification_column = container(Column::with_children(notifications).spacing(8))
            .align_right(Length::Fill)
            .padding(Padding::new(64.0).left(0.0).right(24.0).bottom(0.0));

        iced::widget::stack![
            column![loading_bar],
            toast_column,
            notification_column,
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    pub fn view_dialog_overlay(&self) -> Element<'_, Message> {
        let Some(dialog) = self.notifier.dialog() else {
            return Space::new().into();
        };
        let vars = self.vars();
        let card_bg = token_color(vars.card_bg_color);
        let text_color = token_color(vars.text_color);
        let radius = self.overrides().card_radius;

        let header = row![
            text(&dialog.title).size(18).font(bold()).width(Length::Fill),
            self.plain_button(text("x").size(14), Message::ResolveDialog(DialogOutcome::Closed)),
        ]
        .align_y(iced::Alignment::Center);

        let actions = row![
            Space::new().width(Length::Fill),
            self.plain_button(
                text(&dialog.negative_text).size(14),
                Message::ResolveDialog(DialogOutcome::Negative),
            ),
            self.primary_button(
                &dialog.positive_text,
                Some(Message::ResolveDialog(DialogOutcome::Positive)),
            ),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);

        let popup = container(
            column![header, text(&dialog.content).size(14), actions].spacing(16),
        )
        .padding(20)
        .max_width(DIALOG_WIDTH)
        .style(move |_theme| container::Style {
            background: Some(iced::Background::Color(card_bg)),
            text_color: Some(text_color),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: radius.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                offset: iced::Vector::new(0.0, 25.0),
                blur_radius: 50.0,
            },
            ..Default::default()
        });

        let overlay_bg = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.6,
                    ))),
                    ..Default::default()
                }),
        )
        .on_press(Message::ResolveDialog(DialogOutcome::MaskDismissed));

        // Claims the cursor so clicks inside the dialog never reach the mask.
        let popup_area =
            iced::widget::mouse_area(popup).interaction(iced::mouse::Interaction::Idle);

        let centered_popup = container(popup_area)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill);

        iced::widget::stack![overlay_bg, centered_popup]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
