#[cfg(target_arch = "wasm32")]
use std::cell::Cell;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Function, Object, Reflect};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootPhase {
    Options,
    Mount,
}

impl BootPhase {
    #[allow(dead_code)]
    fn label(self) -> &'static str {
        match self {
            BootPhase::Options => "options",
            BootPhase::Mount => "mount",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootFailure {
    MissingRoot,
}

impl BootFailure {
    fn code(self) -> &'static str {
        match self {
            BootFailure::MissingRoot => "missing-root",
        }
    }

    #[allow(dead_code)]
    fn hint(self) -> &'static str {
        match self {
            BootFailure::MissingRoot => "index.html must contain <div id=\"valentine-root\">",
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static READY_SENT: Cell<bool> = Cell::new(false);
}

#[cfg(target_arch = "wasm32")]
fn notify(method: &str, args: &[JsValue]) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(loader) = Reflect::get(&window, &JsValue::from_str("__VALENTINE_BOOT")) else {
        return;
    };
    let Ok(loader) = loader.dyn_into::<Object>() else {
        return;
    };
    let Ok(func) = Reflect::get(&loader, &JsValue::from_str(method)) else {
        return;
    };
    let Ok(func) = func.dyn_into::<Function>() else {
        return;
    };
    let array: Array = args.iter().collect();
    let _ = func.apply(&loader, &array);
}

#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
pub(crate) fn phase(phase: BootPhase) {
    #[cfg(target_arch = "wasm32")]
    {
        notify("setPhase", &[JsValue::from_str(phase.label())]);
    }
}

pub(crate) fn fail(failure: BootFailure, message: &str) {
    gloo::console::warn!("boot failed", failure.code(), message.to_string());
    #[cfg(target_arch = "wasm32")]
    notify(
        "fail",
        &[
            JsValue::from_str(failure.code()),
            JsValue::from_str(message),
            JsValue::from_str(failure.hint()),
        ],
    );
}

/// Hides the HTML loader. Only the first call reaches the page.
pub(crate) fn ready() {
    #[cfg(target_arch = "wasm32")]
    {
        if READY_SENT.with(|sent| sent.replace(true)) {
            return;
        }
        notify("ready", &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_labels_are_stable() {
        assert_eq!(BootPhase::Options.label(), "options");
        assert_eq!(BootPhase::Mount.label(), "mount");
        assert_eq!(BootFailure::MissingRoot.code(), "missing-root");
        assert!(BootFailure::MissingRoot.hint().contains("valentine-root"));
    }
}
