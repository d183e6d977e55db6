/// One `<item>` as it comes out of the RSS reader, before any normalisation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub title: String,
    pub description: String,
    pub pub_date: String,
    pub enclosure: Enclosure,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enclosure {
    pub url: String,
}
