//! SVG stroke binding for the path animator.

use motion_core::path::StrokeSurface;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct DomStroke {
    path: web::SvgGeometryElement,
}

impl DomStroke {
    pub fn new(path: web::SvgGeometryElement) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &web::SvgGeometryElement {
        &self.path
    }

    fn style(&self) -> web::CssStyleDeclaration {
        self.path.unchecked_ref::<web::SvgElement>().style()
    }
}

impl StrokeSurface for DomStroke {
    fn measure_length(&self) -> Option<f64> {
        let length = f64::from(self.path.get_total_length());
        (length.is_finite() && length > 0.0).then_some(length)
    }

    fn set_dash(&mut self, array: Option<f64>, offset: f64) {
        let style = self.style();
        match array {
            Some(len) => {
                _ = style.set_property("stroke-dasharray", &len.to_string());
            }
            None => {
                _ = style.remove_property("stroke-dasharray");
            }
        }
        _ = style.set_property("stroke-dashoffset", &offset.to_string());
    }

    fn set_transition(&mut self, transition: Option<&str>) {
        let style = self.style();
        match transition {
            Some(value) => {
                _ = style.set_property("transition", value);
            }
            None => {
                _ = style.remove_property("transition");
            }
        }
    }

    fn force_layout(&self) {
        // Reading the bounding box flushes pending style changes.
        _ = self.path.get_bounding_client_rect();
    }
}
