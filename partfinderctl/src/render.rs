use partfinder_core::{Paginator, Product};

const HEADERS: [&str; 3] = ["ID", "NAME", "FITS"];

/// Plain-text table of `products` with an ID, NAME and FITS column.
pub fn product_table(products: &[Product]) -> String {
    let rows: Vec<[String; 3]> = products
        .iter()
        .map(|product| {
            [
                product.id.to_string(),
                product.name.clone(),
                product.fits_summary(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) {
    let [id, name, fits] = cells;
    let line = format!(
        "{id:<id_w$}  {name:<name_w$}  {fits}",
        id_w = widths[0],
        name_w = widths[1],
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Pager control line, e.g. `‹ Prev 1 … 3 4 [5] 6 7 … 10 Next ›`.
///
/// `None` when every result fits on one page.
pub fn pager_line<T>(pager: &Paginator<T>) -> Option<String> {
    if !pager.controls_visible() {
        return None;
    }

    let window = pager.window();
    let total = pager.total_pages();
    let current = pager.current_page();
    let mut parts = Vec::new();

    if pager.has_prev() {
        parts.push("‹ Prev".to_string());
    }
    if window.first_link {
        parts.push("1".to_string());
    }
    if window.leading_ellipsis {
        parts.push("…".to_string());
    }
    for page in &window.pages {
        if *page == current {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if window.trailing_ellipsis {
        parts.push("…".to_string());
    }
    if window.last_link {
        parts.push(total.to_string());
    }
    if pager.has_next() {
        parts.push("Next ›".to_string());
    }

    Some(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use partfinder_core::{CategoryID, Fitment};

    fn pager(count: usize, page: usize) -> Paginator<usize> {
        let mut pager = Paginator::new();
        pager.set_results((0..count).collect());
        pager.go_to(page);
        pager
    }

    #[test]
    fn pager_line_hidden_for_single_page() {
        assert_eq!(pager_line(&pager(30, 1)), None);
    }

    #[test]
    fn pager_line_in_middle() {
        assert_eq!(
            pager_line(&pager(300, 5)).as_deref(),
            Some("‹ Prev 1 … 3 4 [5] 6 7 … 10 Next ›")
        );
    }

    #[test]
    fn pager_line_at_edges() {
        assert_eq!(
            pager_line(&pager(300, 1)).as_deref(),
            Some("[1] 2 3 … 10 Next ›")
        );
        assert_eq!(
            pager_line(&pager(300, 10)).as_deref(),
            Some("‹ Prev 1 … 8 9 [10]")
        );
    }

    #[test]
    fn table_aligns_columns() {
        let mut fork = Product::new("KT4711", "Fork spring", CategoryID(12));
        fork.motorcycles.push(Fitment {
            brand: "KTM".into(),
            model: "250 SX".into(),
            start_year: 2008,
            end_year: 2011,
        });
        let mut lube = Product::new("U1", "Chain lube", CategoryID(3));
        lube.is_universal = true;

        let table = product_table(&[fork, lube]);

        assert_eq!(
            table,
            "ID      NAME         FITS\n\
             KT4711  Fork spring  KTM 250 SX 2008–2011\n\
             U1      Chain lube   Universal\n"
        );
    }
}
