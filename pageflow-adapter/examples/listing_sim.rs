// Example: simulate a scrolling viewport over a paged in-memory source.
use pageflow::{PagingOptions, PagingStatus};
use pageflow_adapter::{Listing, SliceSource, Slot};

fn main() {
    let data: Vec<String> = (0..95).map(|i| format!("message #{i}")).collect();
    let mut l: Listing<usize, String, SliceSource<String>> = Listing::new(
        PagingOptions::new(0).with_invisible_items_threshold(5),
        SliceSource::new(data, 20).with_failure_at(40),
    );

    let viewport = 8usize;
    let mut top = 0usize;
    for frame in 0..60 {
        let end = (top + viewport).min(l.slot_count());
        l.render_pass(top..end);

        if let Some(Slot::NewPageError) = l.slot(l.slot_count() - 1) {
            println!("frame {frame}: page failed, tapping retry");
            l.retry();
        }
        let applied = l.pump();
        if applied > 0 {
            println!(
                "frame {frame}: branch={:?} items={}",
                l.render_branch(),
                l.items().len()
            );
        }

        if l.status() == PagingStatus::Completed {
            break;
        }
        top = (top + viewport / 2).min(l.items().len().saturating_sub(1));
    }

    println!("fetches served: {}", l.source().fetches());
}
