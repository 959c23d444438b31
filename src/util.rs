// Console logging helper shared by the session and the views

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg; // no console off the browser (unit tests)
}

/// Points with a leading sign, e.g. "+30".
pub fn format_delta(points: u32) -> String {
    if points == 0 {
        String::new()
    } else {
        format!("+{}", points)
    }
}
