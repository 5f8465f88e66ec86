use leptos::*;

/// Runs `f` inside a fresh reactive runtime, disposed afterwards.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = create_runtime();
    let result = f();
    runtime.dispose();
    result
}

struct SuppressResourceLoad;

impl SuppressResourceLoad {
    fn enable() -> Self {
        leptos_reactive::suppress_resource_load(true);
        Self
    }
}

impl Drop for SuppressResourceLoad {
    fn drop(&mut self) {
        leptos_reactive::suppress_resource_load(false);
    }
}

/// Renders a component tree to HTML without letting resources start loading.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let _guard = SuppressResourceLoad::enable();
    with_runtime(|| view().into_view().render_to_string().to_string())
}
