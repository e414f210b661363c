use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use shoal::simulation::ecosystem::Ecosystem;
use shoal::simulation::event_log::EventKind;
use shoal::simulation::params::Params;
use shoal::simulation::stats::PopulationStats;
use std::collections::VecDeque;

const MAX_HISTORY_POINTS: usize = 500;

pub struct UIState {
    pub fish_count_history: VecDeque<(f64, f64)>,
    pub pellet_count_history: VecDeque<(f64, f64)>,
    pub avg_speed_history: VecDeque<(f64, f64)>,
    pub avg_detection_history: VecDeque<(f64, f64)>,
    pub status_message: Option<String>,
    pub pointer_over_ui: bool,
    last_update_time: f32,
    update_interval: f32,
}

fn push_capped(history: &mut VecDeque<(f64, f64)>, point: (f64, f64)) {
    history.push_back(point);
    if history.len() > MAX_HISTORY_POINTS {
        history.pop_front();
    }
}

impl UIState {
    pub fn new() -> Self {
        Self {
            fish_count_history: VecDeque::new(),
            pellet_count_history: VecDeque::new(),
            avg_speed_history: VecDeque::new(),
            avg_detection_history: VecDeque::new(),
            status_message: None,
            pointer_over_ui: false,
            last_update_time: 0.0,
            update_interval: 0.5, // Update every 0.5 seconds
        }
    }

    pub fn update_history(&mut self, ecosystem: &Ecosystem, stats: Option<&PopulationStats>) {
        if ecosystem.time - self.last_update_time < self.update_interval {
            return;
        }
        self.last_update_time = ecosystem.time;
        let t = f64::from(ecosystem.time);

        push_capped(
            &mut self.fish_count_history,
            (t, ecosystem.fish.len() as f64),
        );
        push_capped(
            &mut self.pellet_count_history,
            (t, ecosystem.pellets.len() as f64),
        );

        if let Some(stats) = stats {
            push_capped(&mut self.avg_speed_history, (t, f64::from(stats.speed.avg)));
            push_capped(
                &mut self.avg_detection_history,
                (t, f64::from(stats.detection_range.avg)),
            );
        }
    }
}

pub fn draw_ui(state: &mut UIState, ecosystem: &Ecosystem, params: &Params) {
    egui_macroquad::ui(|egui_ctx| {
        egui::Window::new("Population")
            .default_open(false)
            .default_pos(egui::pos2(params.box_width - 320.0, 10.0))
            .default_width(300.0)
            .show(egui_ctx, |ui| {
                draw_summary(ui, state, ecosystem, params);

                ui.collapsing("Counts", |ui| {
                    draw_count_plot(ui, &state.fish_count_history, &state.pellet_count_history);
                });
                ui.collapsing("Average speed", |ui| {
                    draw_time_series_plot(ui, "speed_plot", &state.avg_speed_history, "Speed");
                });
                ui.collapsing("Average detection range", |ui| {
                    draw_time_series_plot(
                        ui,
                        "detection_plot",
                        &state.avg_detection_history,
                        "Range",
                    );
                });
                ui.collapsing("Recent events", |ui| draw_events(ui, ecosystem));
            });

        state.pointer_over_ui = egui_ctx.wants_pointer_input() || egui_ctx.is_pointer_over_area();
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}

fn draw_summary(ui: &mut egui::Ui, state: &UIState, ecosystem: &Ecosystem, params: &Params) {
    ui.label(format!("Time: {:.1}s", ecosystem.time));
    ui.label(format!("Fish: {}", ecosystem.fish.len()));
    ui.label(format!(
        "Pellets: {}/{}",
        ecosystem.pellets.len(),
        params.max_pellets
    ));
    ui.label(format!(
        "Births: {}  Deaths: {}",
        ecosystem.counters.births, ecosystem.counters.deaths
    ));
    ui.label(format!("Meals: {}", ecosystem.counters.meals));
    if let Some(latest) = ecosystem.fish.iter().map(|f| f.generation).max() {
        ui.label(format!("Latest generation: {latest}"));
    }
    if let Some(ref msg) = state.status_message {
        ui.label(msg);
    }
    ui.separator();
}

fn draw_time_series_plot(
    ui: &mut egui::Ui,
    id: &str,
    data: &VecDeque<(f64, f64)>,
    y_label: &str,
) {
    if data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    let points: PlotPoints = data.iter().map(|&(x, y)| [x, y]).collect();
    let line = Line::new(points);

    Plot::new(id)
        .height(120.0)
        .show_axes([true, true])
        .label_formatter(|_name, value| {
            format!("Time: {:.1}s\n{}: {:.2}", value.x, y_label, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

fn draw_count_plot(
    ui: &mut egui::Ui,
    fish_data: &VecDeque<(f64, f64)>,
    pellet_data: &VecDeque<(f64, f64)>,
) {
    if fish_data.is_empty() && pellet_data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    Plot::new("count_plot")
        .height(150.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nTime: {:.1}s\nCount: {:.0}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            let fish_points: PlotPoints = fish_data.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(fish_points)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Fish"),
            );

            let pellet_points: PlotPoints = pellet_data.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(pellet_points)
                    .color(egui::Color32::from_rgb(255, 220, 80))
                    .name("Pellets"),
            );
        });
}

fn draw_events(ui: &mut egui::Ui, ecosystem: &Ecosystem) {
    let events = ecosystem.event_log.events();
    if events.is_empty() {
        ui.label("No events yet...");
        return;
    }

    ui.label(format!(
        "{} births, {} deaths shown",
        ecosystem.event_log.count_of(EventKind::Birth),
        ecosystem.event_log.count_of(EventKind::Death)
    ));

    for event in events {
        let color = match event.kind {
            EventKind::Birth => egui::Color32::from_rgb(100, 255, 100),
            EventKind::Death => egui::Color32::from_rgb(150, 150, 150),
            EventKind::Extinction => egui::Color32::from_rgb(255, 100, 100),
        };
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("[{:.1}s]", event.time))
                    .size(11.0)
                    .monospace(),
            );
            ui.label(
                egui::RichText::new(&event.description)
                    .color(color)
                    .size(11.0),
            );
        });
    }
}
