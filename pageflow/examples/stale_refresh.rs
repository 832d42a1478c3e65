// Example: a slow fetch is superseded by pull-to-refresh and its late result is dropped.
use pageflow::{Delivery, PagingController, PagingOptions};

fn main() {
    let mut c: PagingController<&str, u32> = PagingController::new(PagingOptions::new("first"));
    c.add_listener(|s| {
        println!(
            "items={} loading={} status={:?}",
            s.items.len(),
            s.is_loading,
            s.status()
        )
    });

    let slow = c.request_first_page().expect("idle controller issues the first page");
    let fresh = c.refresh().expect("refresh always issues a new request");

    let late = c.append_page(slow.generation, [1, 2, 3], Some("second"));
    assert_eq!(late, Delivery::Stale);
    println!("late result for generation {:?}: {late:?}", slow.generation);

    let _ = c.append_last_page(fresh.generation, [10, 20]);
    println!("final items: {:?}", c.items());
}
