use eframe::egui;

use lectern_bubbles::{BubbleBuilder, PopupPresenter, ShowTrigger, SourceBubble};
use lectern_page::{parse_translation_groups, TranslationGroup, CLASS_VISIBILITY_ON};
use lectern_settings::{CollectionSettings, LanguageDescriptor, LanguageNameCatalog};

// A small two-group page so the preview exercises overflow folding and the
// focus-only show policy.
const SAMPLE_PAGE: &str = r#"
<page>
    <div class="translation-group title-style">
        <label class="bubble">Book title</label>
        <div lang="en" class="editable visibility-code-on">The Moon and the Cap</div>
        <div lang="es" class="editable">La Luna y la Gorra</div>
        <div lang="fr" class="editable">La Lune et la Casquette</div>
        <div lang="tpi" class="editable">Mun na Kep</div>
    </div>
    <div class="translation-group normal-style">
        <div lang="en" class="editable visibility-code-on">The cap flew away with the wind.</div>
        <div lang="es" class="editable">La gorra se fue volando con el viento.</div>
        <div lang="fr" class="editable">La casquette s'est envolée avec le vent.</div>
    </div>
</page>
"#;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("Lectern source bubbles preview"),
        ..Default::default()
    };
    eframe::run_native(
        "Lectern",
        options,
        Box::new(|_cc| Box::new(LecternPreview::new())),
    )
}

struct LecternPreview {
    settings: CollectionSettings,
    names: LanguageNameCatalog,
    groups: Vec<TranslationGroup>,
    presenter: PopupPresenter,
    focused_group: usize,
    // Anchor heights measured while drawing, applied to the cap next frame.
    anchor_heights: Vec<f32>,
}

impl LecternPreview {
    fn new() -> Self {
        let mut settings = CollectionSettings::default();
        settings.vernacular = LanguageDescriptor::named("en", "English");
        settings.source_languages.collection_language2 = Some("tpi".to_string());
        settings.source_languages.collection_language3 = Some("fr".to_string());
        settings.sanitize();

        let names = LanguageNameCatalog::new(settings.vernacular.tag.clone());
        let groups = parse_translation_groups(SAMPLE_PAGE).unwrap_or_default();
        let anchor_heights = vec![0.0; groups.len()];
        Self {
            settings,
            names,
            groups,
            presenter: PopupPresenter::new(),
            focused_group: 0,
            anchor_heights,
        }
    }

    fn show_group(&mut self, ui: &mut egui::Ui, index: usize) -> Option<String> {
        let group = self.groups[index].clone();
        let focused = self.focused_group == index;
        let bubble = BubbleBuilder::new(&self.settings.source_languages, &self.names)
            .build(&group, None);

        let mut picked = None;
        ui.horizontal_top(|ui| {
            // The editable page text: every block already visible on the page.
            let inline = ui.group(|ui| {
                ui.set_min_width(320.0);
                for block in group
                    .blocks
                    .iter()
                    .filter(|b| b.has_class(CLASS_VISIBILITY_ON))
                {
                    let text = egui::RichText::new(&block.text).size(15.0);
                    if ui
                        .add(egui::Label::new(text).sense(egui::Sense::click()))
                        .clicked()
                    {
                        self.focused_group = index;
                    }
                }
            });
            self.anchor_heights[index] = inline.response.rect.height();

            if let Some(bubble) = bubble {
                // Mirror the focus-only policy for pages where bubbles could
                // collide: only the focused group keeps its bubble open.
                let trigger = self.presenter.show_trigger(self.groups.len() > 1);
                if trigger == ShowTrigger::Always || focused {
                    picked = self.show_bubble(ui, index, &bubble, focused);
                } else {
                    ui.weak("(bubble hidden until focused)");
                }
            }
        });
        picked
    }

    fn show_bubble(
        &self,
        ui: &mut egui::Ui,
        index: usize,
        bubble: &SourceBubble,
        focused: bool,
    ) -> Option<String> {
        let mut picked = None;
        ui.group(|ui| {
            ui.set_min_width(280.0);
            ui.horizontal(|ui| {
                for tab in &bubble.strip.visible {
                    let selected = bubble.selected == tab.lang;
                    let response = ui
                        .selectable_label(selected, &tab.label)
                        .on_hover_text(&tab.lang);
                    if response.clicked() {
                        picked = Some(tab.lang.clone());
                    }
                }
                if let Some(menu) = &bubble.strip.overflow {
                    ui.menu_button(format!("({})", menu.count_label), |ui| {
                        for tab in &menu.entries {
                            if ui.button(&tab.label).clicked() {
                                picked = Some(tab.lang.clone());
                                ui.close_menu();
                            }
                        }
                    });
                }
            });
            ui.separator();

            if let Some(tab) = bubble.strip.find(&bubble.selected) {
                let anchor_height = self.anchor_heights[index];
                let cap = if self.presenter.needs_height_cap(self.groups.len()) {
                    self.presenter.capped_height(f32::INFINITY, anchor_height)
                } else {
                    None
                };
                let passive = self.presenter.is_passive(cap.is_some(), focused);
                egui::ScrollArea::vertical()
                    .id_source(("bubble", index))
                    .max_height(cap.unwrap_or(f32::INFINITY))
                    .show(ui, |ui| {
                        let mut text = egui::RichText::new(&tab.text);
                        if passive {
                            text = text.weak();
                        }
                        ui.label(text);
                    });
            }
        });
        picked
    }
}

impl eframe::App for LecternPreview {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("collection_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Collection:");
                let prefs = &self.settings.source_languages;
                ui.label(format!(
                    "vernacular {} | last used {} | L2 {} | L3 {}",
                    self.settings.vernacular.tag,
                    prefs.default_source_language,
                    prefs.collection_language2.as_deref().unwrap_or("none"),
                    prefs.collection_language3.as_deref().unwrap_or("none"),
                ));
            });
        });

        let mut picked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            for index in 0..self.groups.len() {
                if let Some(tag) = self.show_group(ui, index) {
                    picked = Some((index, tag));
                }
                ui.add_space(12.0);
            }
        });

        // Picking a tab makes that language the new last-used source
        // language; the next pass rebuilds every bubble around it.
        if let Some((index, tag)) = picked {
            self.focused_group = index;
            self.settings.record_source_language_choice(tag);
        }
    }
}
