use std::error::Error;
use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use css::CssStyleSheet;
use dom::{CustomElementDefinition, CustomElementRegistry, Document, LifecycleCallbacks, Template};
use tracing_subscriber::EnvFilter;
use typed_arena::Arena;

const TAG_NAME: &str = "web-component";
const OBSERVED_ATTRIBUTE: &str = "data-attr";

const DEFAULT_STYLE: &str = include_str!("../assets/component.css");
const DEFAULT_TEMPLATE: &str = include_str!("../assets/template.html");

fn main() -> Result<(), Box<dyn Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,dom=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: starter [component-dir]");
        std::process::exit(1);
    }

    let (style, template) = match args.get(1) {
        Some(directory) => load_component(Path::new(directory))?,
        None => (DEFAULT_STYLE.to_string(), DEFAULT_TEMPLATE.to_string()),
    };

    let before = Instant::now();
    let mut style_sheet = CssStyleSheet::new();
    style_sheet.replace_sync(&style)?;
    let template = Template::parse(&template);
    eprintln!("Parsed component resources in {:?}", before.elapsed());
    eprintln!();

    let registry = Rc::new(CustomElementRegistry::new());
    registry.define(
        CustomElementDefinition::new(TAG_NAME, style_sheet, template)
            .observed_attributes([OBSERVED_ATTRIBUTE])
            .callbacks(starter_callbacks()),
    )?;

    let arena = Arena::new();
    let document = Document::new(&arena, registry.clone());
    let other_document = Document::new(&arena, registry);

    let component = document.create_element(TAG_NAME)?;
    component.set_attribute(OBSERVED_ATTRIBUTE, "value")?;
    document
        .body()
        .ok_or("document has no body")?
        .append_child(component)?;

    eprintln!("---- DOM Tree ----");
    eprint!("{}", document.dump());
    eprintln!();

    if let Some(shadow_root) = component.shadow_root() {
        eprintln!("---- Adopted Stylesheets ----");
        for style_sheet in shadow_root.adopted_style_sheets() {
            eprintln!("{}", style_sheet.css_text());
        }
        eprintln!();
    }

    other_document
        .body()
        .ok_or("document has no body")?
        .append_child(component)?;
    component.set_attribute(OBSERVED_ATTRIBUTE, "moved")?;

    eprintln!("---- DOM Tree (second document) ----");
    eprint!("{}", other_document.dump());
    eprintln!();

    component.remove();

    Ok(())
}

fn load_component(directory: &Path) -> Result<(String, String), Box<dyn Error>> {
    let style = std::fs::read_to_string(directory.join("component.css"))?;
    let template = std::fs::read_to_string(directory.join("template.html"))?;
    Ok((style, template))
}

fn starter_callbacks() -> LifecycleCallbacks {
    LifecycleCallbacks::new()
        .on_connected(|_| tracing::info!("{TAG_NAME} added to the DOM."))
        .on_disconnected(|_| tracing::info!("{TAG_NAME} removed from the DOM."))
        .on_adopted(|_, _, _| tracing::info!("{TAG_NAME} moved to a new document."))
        .on_attribute_changed(|_, change| {
            tracing::info!(
                "Attribute: {} changed from {:?} to {:?}",
                change.name,
                change.old_value,
                change.new_value
            )
        })
}
