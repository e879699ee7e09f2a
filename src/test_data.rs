#[cfg(test)]
pub const POST_DATA: &str = "# Travelling light
**2024-06-01**

Packing for two weeks with a single backpack turned out to be easier than expected.

## What I took
- Three shirts
- One jacket
";

#[cfg(test)]
pub const POST_WITH_BLANKS: &str = "


#    Notes on   spacing


**2023-12-31**
Some text right after the date.
";

#[cfg(test)]
pub const NOT_A_POST: &str = "# Places

A list of places worth visiting, kept as a regular wiki page.
";

#[cfg(test)]
pub const README_WITH_BLOG: &str = "# About

Hand written intro that must survive.

# Shantanu's blog

**Collection of the latest and greatest pages from the wiki**

## 2019
- [Old post](https://8hantanu.net/wiki/old)

# Contact

Mail me.
";
