const DEVICON: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";
const PEXELS_SUFFIX: &str = "?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

/// Ordered (keywords, image) table; the first row with a keyword contained
/// in the category wins.
const CATEGORY_IMAGES: &[(&[&str], Image)] = &[
    (&["java"], Image::Devicon("java/java-original-wordmark.svg")),
    (&["python"], Image::Devicon("python/python-original.svg")),
    (&["javascript", "js"], Image::Devicon("javascript/javascript-original.svg")),
    (&["react"], Image::Devicon("react/react-original-wordmark.svg")),
    (&["angular"], Image::Devicon("angularjs/angularjs-original.svg")),
    (&["vue"], Image::Devicon("vuejs/vuejs-original-wordmark.svg")),
    (&["node"], Image::Devicon("nodejs/nodejs-original.svg")),
    (&["c#", "csharp", "dotnet"], Image::Devicon("csharp/csharp-original.svg")),
    (&["c++", "cpp"], Image::Devicon("cplusplus/cplusplus-original.svg")),
    (&["php"], Image::Devicon("php/php-original.svg")),
    (&["programming", "coding"], Image::Pexels("546819")),
    (&["web", "frontend"], Image::Pexels("270348")),
    (&["database", "sql"], Image::Devicon("mysql/mysql-original-wordmark.svg")),
    (&["design"], Image::Pexels("196644")),
    (&["business"], Image::Pexels("3183183")),
    (&["ai", "machine", "data science"], Image::Pexels("8386440")),
];

const DEFAULT_IMAGE: Image = Image::Pexels("577585");

#[derive(Clone, Copy)]
enum Image {
    Devicon(&'static str),
    Pexels(&'static str),
}

impl Image {
    fn url(self) -> String {
        match self {
            Image::Devicon(path) => format!("{}/{}", DEVICON, path),
            Image::Pexels(id) => format!(
                "https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg{}",
                PEXELS_SUFFIX
            ),
        }
    }
}

/// Picture for a course card, chosen by category keywords.
pub fn course_image(category: Option<&str>) -> String {
    let cat = category.unwrap_or_default().to_lowercase();

    CATEGORY_IMAGES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| cat.contains(k)))
        .map(|(_, image)| *image)
        .unwrap_or(DEFAULT_IMAGE)
        .url()
}
