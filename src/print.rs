use std::io;
use std::path::Path;

use comfy_table::presets::UTF8_NO_BORDERS;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use itertools::{Itertools, MinMaxResult};
use plotters::chart::ChartBuilder;
use plotters::coord::Shift;
use plotters::prelude::{
    DrawingArea, DrawingAreaErrorKind, DrawingBackend, IntoDrawingArea, IntoSegmentedCoord,
    SVGBackend,
};
use plotters::series::Histogram;
use plotters::style::{Color, RGBColor, WHITE};

use crate::ProbabilityCurve;

#[allow(type_alias_bounds)]
pub type HistResult<DB: DrawingBackend> = Result<(), DrawingAreaErrorKind<DB::ErrorType>>;

const HIST_COLOR: RGBColor = RGBColor(0x1F, 0x77, 0xB4);
const MAX_X_LABELS: usize = 45;
const PLOT_SIZE: (u32, u32) = (800, 400);

pub trait PrintExt {
    fn table(&self) -> String;

    fn plot<DB>(&self, title: &str, area: DrawingArea<DB, Shift>) -> HistResult<DB>
    where
        DB: DrawingBackend;

    fn print_table(&self) {
        print!("{}", self.table());
    }

    fn save_svg(&self, title: &str, path: &Path) -> Result<(), DrawingAreaErrorKind<io::Error>> {
        let area = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
        self.plot(title, area.clone())?;
        area.present()
    }
}

impl PrintExt for ProbabilityCurve {
    fn table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_NO_BORDERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![Cell::new("Damage >="), Cell::new("Probability")]);
        for (threshold, probability) in self.sorted() {
            table.add_row(vec![
                Cell::new(threshold).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:6.2}%", probability * 100.0))
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        format!("Thresholds: {}\n\n{table}\n", self.len())
    }

    fn plot<DB>(&self, title: &str, area: DrawingArea<DB, Shift>) -> HistResult<DB>
    where
        DB: DrawingBackend,
    {
        let points = self.sorted();
        let (x0, x1) = match points.iter().map(|&(t, _)| t).minmax() {
            MinMaxResult::NoElements => return Ok(()),
            MinMaxResult::OneElement(x) => (x, x),
            MinMaxResult::MinMax(x0, x1) => (x0, x1),
        };

        area.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&area);
        chart
            .x_label_area_size(35)
            .y_label_area_size(50)
            .margin(10)
            .caption(title, ("sans-serif", 16.0));

        let mut coord = chart.build_cartesian_2d((x0..x1).into_segmented(), 0f64..1f64)?;

        coord
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(points.len().min(MAX_X_LABELS))
            .y_label_formatter(&|y: &f64| format!("{:5.1}%", *y * 100.0))
            .x_desc("Damage threshold (>= X)")
            .y_desc("Probability")
            .draw()?;

        coord.draw_series(
            Histogram::vertical(&coord)
                .style(HIST_COLOR.filled())
                .margin(1)
                .data(points),
        )?;

        Ok(())
    }
}
