use std::fmt::Debug;

use include_dir::{include_dir, Dir, File};
use lazy_static::*;
use serde::Serialize;
use tera::Tera;

pub use help::*;
pub use ranking::*;

mod formatters;
mod help;
mod ranking;

/// Messages that are rendered from a template.
pub trait Widget
where
    Self: Serialize + Sized + Debug,
{
    /// Must be a file name ending in `.j2`, located in `src/res/widgets/`.
    const FILE: &'static str;

    /// Render the template file with this context.
    fn render(&self) -> tera::Result<String> {
        log::debug!("render widget context: {:?}", &self);

        let tera_context = tera::Context::from_serialize(self)?;
        TEMPLATES.render(Self::FILE, &tera_context)
    }
}

lazy_static! {
    static ref TEMPLATES: Tera = collect_templates().expect("failed to collect widget templates");
}

fn collect_templates() -> tera::Result<Tera> {
    // Include all widget templates at compile-time:
    static TEMPLATE_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/res/widgets");

    let mut tera = Tera::default();

    let add_from_file = |tera: &mut Tera, file: &File<'_>| -> tera::Result<()> {
        let file_name = file
            .path()
            .to_str()
            .ok_or_else(|| tera::Error::msg("template name is not UTF-8"))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| tera::Error::msg(format!("template '{}' is not UTF-8", file_name)))?;
        tera.add_raw_template(file_name, contents)
    };

    // Add macro templates first, because others import them.
    let controls = TEMPLATE_DIR
        .get_file("controls.j2")
        .ok_or_else(|| tera::Error::msg("failed to find template 'controls.j2'"))?;
    add_from_file(&mut tera, controls)?;

    // Add all other templates.
    for file in TEMPLATE_DIR.files() {
        add_from_file(&mut tera, file)?;
    }

    Ok(tera)
}
