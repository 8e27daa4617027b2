use chronicle_parser::{PostRecord, PostType};

/// A numbered group of records from one session file, with any recap
/// records hoisted to the front.
#[derive(Debug, Clone)]
pub struct Session {
    pub number: u32,
    pub title: Option<String>,
    pub date: Option<String>,
    pub posts: Vec<PostRecord>,
}

/// Build a session from records in document order.
///
/// The session date comes from the first record as written (before
/// hoisting); the title comes from the first recap record, if any. Recaps
/// render first, and relative order is preserved within each group.
pub fn organize(number: u32, records: Vec<PostRecord>) -> Session {
    let date = records
        .first()
        .and_then(|record| record.date())
        .map(str::to_string);

    let (recaps, rest): (Vec<PostRecord>, Vec<PostRecord>) = records
        .into_iter()
        .partition(|record| record.post_type == PostType::Recap);

    let title = recaps
        .first()
        .and_then(|record| record.title())
        .map(str::to_string);

    let mut posts = recaps;
    posts.extend(rest);

    Session {
        number,
        title,
        date,
        posts,
    }
}
