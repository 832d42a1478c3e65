// Example: drive a controller by hand, the way a render loop and a fetch task would.
use pageflow::{PageResult, PagingController, PagingOptions, PagingStatus};

fn fetch(key: usize) -> PageResult<usize, String> {
    const TOTAL: usize = 45;
    const PAGE: usize = 20;
    let end = (key + PAGE).min(TOTAL);
    let items = (key..end).map(|i| format!("row {i}")).collect();
    if end < TOTAL {
        PageResult::Next {
            items,
            next_key: end,
        }
    } else {
        PageResult::Last { items }
    }
}

fn main() {
    let mut c: PagingController<usize, String> = PagingController::new(PagingOptions::new(0));
    c.add_status_listener(|status| println!("status -> {status:?}"));

    let mut pending = c.request_first_page();
    let mut rendered = 0usize;
    while let Some(request) = pending.take() {
        println!("fetching key={} generation={:?}", request.key, request.generation);
        let _ = c.complete(request.generation, fetch(request.key));

        // Materialize rows until the trigger asks for more.
        while rendered < c.item_count() && pending.is_none() {
            pending = c.on_item_materialized(rendered);
            rendered += 1;
        }
    }

    assert_eq!(c.status(), PagingStatus::Completed);
    println!("loaded {} items", c.item_count());
}
