//! DOM binding for the hero pipeline diagram.
//!
//! The markup contract: a `[data-hero]` section containing an `svg`, source
//! cards under `[data-source]`, model grid nodes under `.model-node`,
//! output groups under `[data-output]`, connection paths classed
//! `.connection-line-input` / `.connection-line-output`, and a progress
//! fill at `[data-progress="core"]`. Particles are circles created on the
//! fly and positioned with `getPointAtLength`.

use crate::dom;
use crate::stroke::DomStroke;
use motion_core::hero::{HeroSurface, Lane, ParticleId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const ACTIVE_CLASS: &str = "is-active";

#[derive(Clone)]
pub struct DomHeroSurface {
    document: web::Document,
    svg: web::SvgsvgElement,
    sources: Vec<web::Element>,
    nodes: Vec<web::Element>,
    output_groups: Vec<web::Element>,
    input_lines: Vec<web::SvgGeometryElement>,
    output_lines: Vec<web::SvgGeometryElement>,
    progress: Option<web::Element>,
    particles: Rc<RefCell<HashMap<ParticleId, web::Element>>>,
    next_particle: Rc<Cell<ParticleId>>,
}

impl DomHeroSurface {
    /// Bind to the hero section. `None` when the page has none, or when the
    /// section is missing its SVG (warned, animation skipped).
    pub fn find(document: &web::Document) -> Option<Self> {
        let root = document.query_selector("[data-hero]").ok().flatten()?;
        let svg = match root
            .query_selector("svg")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::SvgsvgElement>().ok())
        {
            Some(svg) => svg,
            None => {
                log::warn!("hero section has no svg, skipping hero animation");
                return None;
            }
        };

        let geometry = |selector: &str| -> Vec<web::SvgGeometryElement> {
            dom::query_all(document, selector)
                .into_iter()
                .filter_map(|el| el.dyn_into::<web::SvgGeometryElement>().ok())
                .collect()
        };

        Some(Self {
            document: document.clone(),
            svg,
            sources: dom::query_all(document, "[data-hero] [data-source]"),
            nodes: dom::query_all(document, "[data-hero] .model-node"),
            output_groups: dom::query_all(document, "[data-hero] [data-output]"),
            input_lines: geometry("[data-hero] .connection-line-input"),
            output_lines: geometry("[data-hero] .connection-line-output"),
            progress: document
                .query_selector("[data-hero] [data-progress=\"core\"]")
                .ok()
                .flatten(),
            particles: Rc::new(RefCell::new(HashMap::new())),
            next_particle: Rc::new(Cell::new(0)),
        })
    }

    pub fn input_strokes(&self) -> Vec<DomStroke> {
        self.input_lines.iter().cloned().map(DomStroke::new).collect()
    }

    pub fn output_strokes(&self) -> Vec<DomStroke> {
        self.output_lines.iter().cloned().map(DomStroke::new).collect()
    }

    pub fn root_element(&self) -> &web::SvgsvgElement {
        &self.svg
    }

    fn line(&self, lane: Lane, index: usize) -> Option<&web::SvgGeometryElement> {
        match lane {
            Lane::Input => self.input_lines.get(index),
            Lane::Output => self.output_lines.get(index),
        }
    }

    fn style_of(element: &web::Element) -> Option<web::CssStyleDeclaration> {
        if let Some(html) = element.dyn_ref::<web::HtmlElement>() {
            return Some(html.style());
        }
        element.dyn_ref::<web::SvgElement>().map(|el| el.style())
    }

    fn set_style(element: &web::Element, property: &str, value: &str) {
        if let Some(style) = Self::style_of(element) {
            _ = style.set_property(property, value);
        }
    }

    fn reveal(element: &web::Element, transition: &str) {
        Self::set_style(element, "transition", transition);
        _ = element.class_list().add_1(ACTIVE_CLASS);
    }
}

impl HeroSurface for DomHeroSurface {
    fn source_count(&self) -> usize {
        self.sources.len()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn output_group_count(&self) -> usize {
        self.output_groups.len()
    }

    fn fade_in_source(&mut self, index: usize, duration_ms: f64) {
        if let Some(source) = self.sources.get(index) {
            Self::reveal(
                source,
                &format!("opacity {duration_ms}ms ease, transform {duration_ms}ms ease"),
            );
        }
    }

    fn show_source(&mut self, index: usize) {
        if let Some(source) = self.sources.get(index) {
            Self::reveal(source, "none");
        }
    }

    fn set_node_transition(&mut self, index: usize, duration_ms: Option<f64>) {
        if let Some(node) = self.nodes.get(index) {
            let transition = match duration_ms {
                Some(ms) => format!("fill {ms}ms ease"),
                None => "none".to_owned(),
            };
            Self::set_style(node, "transition", &transition);
        }
    }

    fn set_node_fill(&mut self, index: usize, fill: &str) {
        if let Some(node) = self.nodes.get(index) {
            _ = node.set_attribute("fill", fill);
        }
    }

    fn fill_progress(&mut self, duration_ms: f64) {
        if let Some(progress) = &self.progress {
            Self::set_style(
                progress,
                "transition",
                &format!("width {duration_ms}ms cubic-bezier(0.25, 0.46, 0.45, 0.94)"),
            );
            Self::set_style(progress, "width", "100%");
        }
    }

    fn fill_progress_instant(&mut self) {
        if let Some(progress) = &self.progress {
            Self::set_style(progress, "transition", "none");
            Self::set_style(progress, "width", "100%");
        }
    }

    fn fade_in_output_group(&mut self, index: usize, duration_ms: f64) {
        if let Some(group) = self.output_groups.get(index) {
            Self::reveal(
                group,
                &format!("opacity {duration_ms}ms ease, transform {duration_ms}ms ease"),
            );
        }
    }

    fn show_output_group(&mut self, index: usize) {
        if let Some(group) = self.output_groups.get(index) {
            Self::reveal(group, "none");
        }
    }

    fn spawn_particle(&mut self, _lane: Lane, _line: usize, color: &str, radius: f64) -> ParticleId {
        let id = self.next_particle.get();
        self.next_particle.set(id + 1);

        let Ok(circle) = self.document.create_element_ns(Some(SVG_NS), "circle") else {
            log::warn!("could not create particle");
            return id;
        };
        _ = circle.set_attribute("class", "flow-particle");
        _ = circle.set_attribute("r", &radius.to_string());
        _ = circle.set_attribute("fill", color);
        _ = circle.set_attribute("opacity", "0.8");
        _ = self.svg.append_child(&circle);
        self.particles.borrow_mut().insert(id, circle);
        id
    }

    fn place_particle(&mut self, id: ParticleId, lane: Lane, line: usize, t: f64) {
        let particles = self.particles.borrow();
        let (Some(circle), Some(path)) = (particles.get(&id), self.line(lane, line)) else {
            return;
        };
        let length = f64::from(path.get_total_length()) * t.clamp(0.0, 1.0);
        if let Ok(point) = path.get_point_at_length(length as f32) {
            _ = circle.set_attribute("cx", &point.x().to_string());
            _ = circle.set_attribute("cy", &point.y().to_string());
        }
    }

    fn remove_particle(&mut self, id: ParticleId) {
        if let Some(circle) = self.particles.borrow_mut().remove(&id) {
            circle.remove();
        }
    }
}
