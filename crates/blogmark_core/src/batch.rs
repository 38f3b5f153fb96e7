/// A run of consecutive URLs that are converted concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<'a> {
    /// Zero-based position of the first URL of this batch in the full list.
    pub offset: usize,
    pub urls: &'a [String],
}

impl Batch<'_> {
    /// One-based positions of the URLs in this batch, paired with the URL.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.urls
            .iter()
            .enumerate()
            .map(move |(i, url)| (self.offset + i + 1, url.as_str()))
    }
}

/// Partition `urls` into consecutive batches of at most `concurrency` items.
///
/// A `concurrency` of zero is treated as one.
pub fn plan_batches(urls: &[String], concurrency: usize) -> Vec<Batch<'_>> {
    let size = concurrency.max(1);
    urls.chunks(size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            offset: i * size,
            urls: chunk,
        })
        .collect()
}
