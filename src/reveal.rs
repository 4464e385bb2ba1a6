// One-shot reveal of [data-animate] elements, plus the hero trigger that
// starts the counters. Both use IntersectionObserver and stop observing an
// element the first time it intersects.

use std::cell::RefCell;
use std::rc::Rc;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config::SiteConfig;
use crate::counter;
use crate::error::Result;
use crate::utils;

/// Latch that reports `true` the first time it is fired and never again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// One latch per observed element, indexed in observation order.
#[derive(Clone, Debug, Default)]
pub struct RevealSet {
    latches: Vec<OneShot>,
}

impl RevealSet {
    pub fn new(len: usize) -> Self {
        RevealSet {
            latches: vec![OneShot::default(); len],
        }
    }

    /// Whether this entry should reveal element `index` now.
    pub fn on_entry(&mut self, index: usize, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }
        self.latches
            .get_mut(index)
            .map(OneShot::fire)
            .unwrap_or(false)
    }

    #[cfg(test)]
    fn revealed(&self) -> usize {
        self.latches.iter().filter(|latch| latch.has_fired()).count()
    }
}

type EntryFn = dyn FnMut(Array, IntersectionObserver);
type EntryCallback = Closure<EntryFn>;

fn make_observer(
    callback: &EntryCallback,
    threshold: f64,
    root_margin: Option<&str>,
) -> Result<IntersectionObserver> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    Ok(IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    )?)
}

fn entries(list: &Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    list.iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
}

fn observe_reveals(document: &Document, config: &SiteConfig) -> Result<usize> {
    let config = config.reveal.clone();
    let targets = utils::query_all(document, &config.selector)?;
    if targets.is_empty() {
        return Ok(0);
    }

    let state = Rc::new(RefCell::new(RevealSet::new(targets.len())));
    let callback_targets: Vec<Element> = targets.clone();
    let visible_class = config.visible_class.clone();
    let callback = Closure::wrap(Box::new(move |list: Array, observer: IntersectionObserver| {
        for entry in entries(&list) {
            let target = entry.target();
            let index = match callback_targets.iter().position(|el| *el == target) {
                Some(index) => index,
                None => continue,
            };
            if state.borrow_mut().on_entry(index, entry.is_intersecting()) {
                if let Err(e) = target.class_list().add_1(&visible_class) {
                    log::warn!("reveal failed: {:?}", e);
                }
                observer.unobserve(&target);
            }
        }
    }) as Box<EntryFn>);

    let observer = make_observer(&callback, config.threshold, Some(&config.root_margin))?;
    for target in &targets {
        observer.observe(target);
    }
    callback.forget();
    Ok(targets.len())
}

fn observe_hero(document: &Document, config: &SiteConfig) -> Result<bool> {
    let hero = match document.get_element_by_id(&config.reveal.hero_id) {
        Some(hero) => hero,
        None => return Ok(false),
    };

    let counters = config.counters.clone();
    let document = document.clone();
    let mut trigger = OneShot::default();
    let callback = Closure::wrap(Box::new(move |list: Array, observer: IntersectionObserver| {
        let first = match entries(&list).next() {
            Some(entry) => entry,
            None => return,
        };
        if first.is_intersecting() && trigger.fire() {
            match counter::start_all(&document, &counters) {
                Ok(n) => log::debug!("hero visible, {} counters started", n),
                Err(e) => log::warn!("counters failed to start: {}", e),
            }
            observer.unobserve(&first.target());
        }
    }) as Box<EntryFn>);

    let observer = make_observer(&callback, config.reveal.hero_threshold, None)?;
    observer.observe(&hero);
    callback.forget();
    Ok(true)
}

pub fn attach(document: &Document, config: &SiteConfig) -> Result<bool> {
    let revealed = observe_reveals(document, config)?;
    let hero = observe_hero(document, config)?;
    log::debug!("observing {} reveal targets, hero trigger {}", revealed, hero);
    Ok(revealed > 0 || hero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once() {
        let mut latch = OneShot::default();
        assert!(latch.fire());
        assert!(!latch.fire());
        assert!(latch.has_fired());
    }

    #[test]
    fn element_revealed_once_across_reentries() {
        let mut set = RevealSet::new(2);
        assert!(!set.on_entry(0, false));
        assert!(set.on_entry(0, true));
        assert!(!set.on_entry(0, false));
        assert!(!set.on_entry(0, true));
        assert_eq!(set.revealed(), 1);
        assert!(set.on_entry(1, true));
        assert_eq!(set.revealed(), 2);
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut set = RevealSet::new(1);
        assert!(!set.on_entry(5, true));
        assert_eq!(set.revealed(), 0);
    }
}
