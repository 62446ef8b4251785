use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use eframe::{egui, App, Frame};
use tokio::runtime::Handle;

use crate::weather::{LookupOutcome, WeatherLookup};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0xe6, 0xf7, 0xee);
const ROYAL_BLUE: egui::Color32 = egui::Color32::from_rgb(0x41, 0x69, 0xe1);

/// The three output labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub temperature: String,
    pub emoji: String,
    pub description: String,
    /// The temperature label holds an error message instead of a reading.
    pub showing_error: bool,
}

impl DisplayState {
    /// Overwrites every label, except for [`LookupOutcome::Ignored`] which
    /// leaves the display as it was.
    pub fn apply(&mut self, outcome: &LookupOutcome) {
        match outcome {
            LookupOutcome::Weather(report) => {
                self.temperature = report.temperature_label();
                self.emoji = report.emoji.to_string();
                self.description = report.description.clone();
                self.showing_error = false;
            }
            LookupOutcome::Error(state) => {
                self.temperature = state.message.clone();
                self.emoji.clear();
                self.description.clear();
                self.showing_error = true;
            }
            LookupOutcome::Ignored => {}
        }
    }
}

pub struct WeatherApp {
    city_input: String,
    display: DisplayState,
    lookup: WeatherLookup,
    runtime: Handle,
    // Clicks are not serialized; overlapping requests just race for this slot.
    in_flight: Arc<AtomicUsize>,
    weather_result: Arc<Mutex<Option<LookupOutcome>>>,
}

impl WeatherApp {
    pub fn new(lookup: WeatherLookup, runtime: Handle) -> Self {
        Self {
            city_input: String::new(),
            display: DisplayState::default(),
            lookup,
            runtime,
            in_flight: Arc::new(AtomicUsize::new(0)),
            weather_result: Arc::new(Mutex::new(None)),
        }
    }

    fn submit(&self, ctx: &egui::Context) {
        let city = self.city_input.clone();
        let lookup = self.lookup.clone();
        let result = Arc::clone(&self.weather_result);
        let in_flight = Arc::clone(&self.in_flight);
        let ctx = ctx.clone();

        in_flight.fetch_add(1, Ordering::SeqCst);
        self.runtime.spawn(async move {
            let outcome = lookup.fetch(&city).await;
            *lock_slot(&result) = Some(outcome);
            in_flight.fetch_sub(1, Ordering::SeqCst);
            ctx.request_repaint();
        });
    }

    fn take_result(&mut self) {
        let outcome = lock_slot(&self.weather_result).take();
        if let Some(outcome) = outcome {
            self.display.apply(&outcome);
        }
    }
}

/// The slot only ever holds a finished outcome, so a poisoned lock still
/// carries usable data.
fn lock_slot(slot: &Mutex<Option<LookupOutcome>>) -> MutexGuard<'_, Option<LookupOutcome>> {
    slot.lock().unwrap_or_else(|poisoned| {
        tracing::error!("Weather result slot poisoned; recovering last outcome");
        poisoned.into_inner()
    })
}

impl App for WeatherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.take_result();

        let panel_frame = egui::Frame::none()
            .fill(BACKGROUND)
            .inner_margin(egui::Margin::same(20.0));

        egui::CentralPanel::default().frame(panel_frame).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Enter city name:")
                        .size(50.0)
                        .strong()
                        .color(ROYAL_BLUE),
                );
                ui.add_space(10.0);

                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.city_input)
                        .font(egui::FontId::proportional(50.0))
                        .text_color(ROYAL_BLUE)
                        .desired_width(f32::INFINITY),
                );
                let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.add_space(10.0);

                let button = egui::Button::new(
                    egui::RichText::new("Get Weather")
                        .size(30.0)
                        .color(egui::Color32::WHITE),
                )
                .fill(ROYAL_BLUE)
                .min_size(egui::vec2(ui.available_width(), 60.0));

                if ui.add(button).clicked() || entered {
                    self.submit(ctx);
                }
                ui.add_space(20.0);

                if self.in_flight.load(Ordering::SeqCst) > 0 {
                    ui.spinner();
                }

                let temperature = if self.display.showing_error {
                    egui::RichText::new(&self.display.temperature).size(35.0).strong()
                } else {
                    egui::RichText::new(&self.display.temperature).size(75.0)
                };
                ui.label(temperature.color(ROYAL_BLUE));
                ui.add_space(20.0);

                ui.label(egui::RichText::new(&self.display.emoji).size(100.0));
                ui.add_space(20.0);

                ui.label(
                    egui::RichText::new(&self.display.description)
                        .size(60.0)
                        .color(ROYAL_BLUE),
                );
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::provider::WeatherProvider;
    use crate::weather::{ErrorState, WeatherReport};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers every city with clear sky after a per-city delay, using the
    /// city name as the description.
    struct DelayedProvider;

    #[async_trait]
    impl WeatherProvider for DelayedProvider {
        async fn fetch(&self, city: &str) -> Result<serde_json::Value, FetchError> {
            let delay = if city == "Slow" { 300 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(serde_json::json!({
                "cod": 200,
                "main": { "temp": 295.15 },
                "weather": [{ "id": 800, "description": city }]
            }))
        }
    }

    fn delayed_app() -> WeatherApp {
        let lookup = WeatherLookup::with_provider(Arc::new(DelayedProvider));
        WeatherApp::new(lookup, Handle::current())
    }

    async fn wait_until_idle(app: &WeatherApp) {
        for _ in 0..200 {
            if app.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("requests still in flight");
    }

    fn clear_sky() -> LookupOutcome {
        LookupOutcome::Weather(WeatherReport {
            temperature_c: 22,
            condition_id: 800,
            description: "Clear sky".to_string(),
            emoji: "☀️",
        })
    }

    fn not_found() -> LookupOutcome {
        LookupOutcome::Error(ErrorState {
            message: "Not Found\nCity not found".to_string(),
        })
    }

    #[test]
    fn test_weather_fills_all_labels() {
        let mut display = DisplayState::default();
        display.apply(&clear_sky());

        assert_eq!(display.temperature, "22°C");
        assert_eq!(display.emoji, "☀️");
        assert_eq!(display.description, "Clear sky");
        assert!(!display.showing_error);
    }

    #[test]
    fn test_error_clears_other_labels() {
        let mut display = DisplayState::default();
        display.apply(&clear_sky());
        display.apply(&not_found());

        assert_eq!(display.temperature, "Not Found\nCity not found");
        assert!(display.emoji.is_empty());
        assert!(display.description.is_empty());
        assert!(display.showing_error);
    }

    #[test]
    fn test_weather_replaces_error() {
        let mut display = DisplayState::default();
        display.apply(&not_found());
        display.apply(&clear_sky());

        assert_eq!(display.temperature, "22°C");
        assert!(!display.showing_error);
    }

    #[test]
    fn test_ignored_leaves_display_unchanged() {
        let mut display = DisplayState::default();
        display.apply(&clear_sky());
        let before = display.clone();

        display.apply(&LookupOutcome::Ignored);

        assert_eq!(display, before);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_overlapping_submissions_last_to_finish_wins() {
        let mut app = delayed_app();
        let ctx = egui::Context::default();

        app.city_input = "slow".to_string();
        app.submit(&ctx);
        app.city_input = "fast".to_string();
        app.submit(&ctx);
        assert!(app.in_flight.load(Ordering::SeqCst) > 0);

        wait_until_idle(&app).await;
        app.take_result();

        assert_eq!(app.in_flight.load(Ordering::SeqCst), 0);
        assert_eq!(app.display.temperature, "22°C");
        assert_eq!(app.display.description, "Slow");
        assert_eq!(app.display.emoji, "☀️");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_result_is_taken_once() {
        let mut app = delayed_app();
        app.city_input = " fast ".to_string();
        app.submit(&egui::Context::default());

        wait_until_idle(&app).await;
        app.take_result();
        assert_eq!(app.display.description, "Fast");

        app.display = DisplayState::default();
        app.take_result();
        assert_eq!(app.display, DisplayState::default());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_poisoned_slot_still_delivers_outcome() {
        let mut app = delayed_app();
        let slot = Arc::clone(&app.weather_result);
        let _ = std::thread::spawn(move || {
            let mut guard = slot.lock().unwrap();
            *guard = Some(clear_sky());
            panic!("worker died while holding the slot");
        })
        .join();
        assert!(app.weather_result.is_poisoned());

        app.take_result();

        assert_eq!(app.display.temperature, "22°C");
        assert_eq!(app.display.description, "Clear sky");
    }
}
