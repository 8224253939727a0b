use eframe::egui::{RichText, Ui};
use egui_plot::{AxisHints, Bar, BarChart, HPlacement, Legend, Line, Plot, PlotPoints, Points};

use crate::config::CHART;
use crate::domain::Token;
use crate::models::{VelocityPoint, VelocitySeries};
use crate::ui::format::format_number;
use crate::ui::styles::UiStyleExt;
use crate::ui::{UI_CONFIG, UI_TEXT};

/// Composed chart: velocity line on the left axis, volume bars on the right.
///
/// egui_plot has a single y scale, so the bars are scaled onto the velocity
/// range and the right axis formatter undoes the scaling.
#[derive(Default)]
pub struct VelocityChart {
    series: VelocitySeries,
}

impl VelocityChart {
    pub fn show(&mut self, ui: &mut Ui, token: &Token, currency: &str) {
        let velocity = token.quote_or_empty(currency).velocity;
        let points = self.series.points_for(token.id, velocity);

        UI_CONFIG.card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label_subheader(UI_TEXT.chart_title.as_str());
            ui.add_space(6.0);
            render_plot(ui, token, points);
        });
    }
}

fn render_plot(ui: &mut Ui, token: &Token, points: &[VelocityPoint]) {
    if points.is_empty() {
        ui.label(RichText::new("--").color(UI_CONFIG.colors.subdued));
        return;
    }

    let max_velocity = points
        .iter()
        .map(|p| p.velocity)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    let max_volume = points
        .iter()
        .map(|p| p.volume)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    // Tallest bar reaches the top of the velocity range.
    let volume_scale = max_velocity / max_volume;

    let velocity_points: Vec<[f64; 2]> = points
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.velocity])
        .collect();

    let bars: Vec<Bar> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Bar::new(i as f64, p.volume * volume_scale)
                .width(CHART.volume_bar_width)
                .fill(CHART.color_volume)
        })
        .collect();

    let point_count = points.len();
    let x_axis = AxisHints::new_x()
        .label(UI_TEXT.chart_x_axis.as_str())
        .formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 || idx as usize >= point_count {
                return String::new();
            }
            format!("{}h", point_count - 1 - idx as usize)
        });
    let velocity_axis = AxisHints::new_y()
        .label(UI_TEXT.chart_velocity.as_str())
        .formatter(|mark, _range| format!("{:.3}", mark.value));
    let volume_axis = AxisHints::new_y()
        .label(UI_TEXT.chart_volume.as_str())
        .placement(HPlacement::Right)
        .formatter(move |mark, _range| format_number(Some(mark.value / volume_scale)));

    let velocity_name = UI_TEXT.chart_velocity.clone();
    let volume_name = UI_TEXT.chart_volume.clone();

    Plot::new(("velocity_plot", token.id))
        .height(CHART.height)
        .legend(Legend::default())
        .custom_x_axes(vec![x_axis])
        .custom_y_axes(vec![velocity_axis, volume_axis])
        .include_y(0.0)
        .include_y(max_velocity * 1.1)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .label_formatter(move |name, value| {
            let hours_ago = (point_count as f64 - 1.0 - value.x.round()).max(0.0);
            if name == volume_name {
                format!(
                    "{} {}h\n{}",
                    name,
                    hours_ago,
                    format_number(Some(value.y / volume_scale))
                )
            } else if name == velocity_name {
                format!("{} {}h\n{:.3}", name, hours_ago, value.y)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(UI_TEXT.chart_volume.as_str(), bars).color(CHART.color_volume),
            );
            plot_ui.line(
                Line::new(
                    UI_TEXT.chart_velocity.as_str(),
                    PlotPoints::new(velocity_points.clone()),
                )
                .color(CHART.color_velocity)
                .width(CHART.velocity_line_width),
            );
            plot_ui.points(
                Points::new(
                    UI_TEXT.chart_velocity.as_str(),
                    PlotPoints::new(velocity_points),
                )
                .color(CHART.color_velocity)
                .radius(CHART.velocity_marker_radius),
            );
        });
}
