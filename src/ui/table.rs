use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::Subset;

const ROW_HEIGHT: f32 = 20.0;
const TABLE_HEIGHT: f32 = 320.0;

/// Every column of the subset rows, inside a panel that starts collapsed.
pub fn raw_table(ui: &mut Ui, subset: &Subset) {
    egui::CollapsingHeader::new("See the full table")
        .id_salt("raw_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let ds = subset.dataset();

            egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .max_scroll_height(TABLE_HEIGHT)
                    .cell_layout(Layout::left_to_right(Align::Center))
                    .column(Column::auto().at_least(32.0))
                    .columns(Column::auto().at_least(60.0).clip(true), ds.columns.len())
                    .header(ROW_HEIGHT, |mut header| {
                        header.col(|ui: &mut Ui| {
                            ui.strong("#");
                        });
                        for column in &ds.columns {
                            header.col(|ui: &mut Ui| {
                                ui.strong(column.name.as_str());
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, subset.len(), |mut row| {
                            let idx = subset.indices()[row.index()];
                            row.col(|ui: &mut Ui| {
                                ui.label(idx.to_string());
                            });
                            for cell in &ds.rows[idx].cells {
                                row.col(|ui: &mut Ui| {
                                    ui.label(cell.to_string());
                                });
                            }
                        });
                    });
            });
        });
}
