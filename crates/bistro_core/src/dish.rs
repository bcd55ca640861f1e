//! Dishes: the work items that flow through the queue.
//!
//! Every dish carries its own ingredient requirements and a course. The
//! course decides how a dietary request reshapes the dish before it joins
//! the queue; each course implements [`DietaryAdjust`] and [`Dish`]
//! dispatches on the variant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ingredient::Ingredient;

const MEAT_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "bacon", "ham", "sausage", "turkey", "duck", "fish",
    "salmon", "tuna", "shrimp", "prawn", "anchovy", "anchovies", "meat", "meatball", "seafood",
];

const ANIMAL_KEYWORDS: &[&str] = &[
    "egg", "milk", "cheese", "butter", "cream", "honey", "yogurt", "gelatin",
];

const GLUTEN_KEYWORDS: &[&str] = &[
    "flour", "bread", "breadcrumb", "pasta", "spaghetti", "wheat", "barley", "rye", "crouton",
    "noodle",
];

const NUT_KEYWORDS: &[&str] = &[
    "almond", "pecan", "walnut", "cashew", "pistachio", "hazelnut", "peanut", "nut",
];

/// Cuisine a dish belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuisineType {
    Italian,
    Mexican,
    Chinese,
    Indian,
    American,
    French,
    #[default]
    Other,
}

impl CuisineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Italian => "Italian",
            Self::Mexican => "Mexican",
            Self::Chinese => "Chinese",
            Self::Indian => "Indian",
            Self::American => "American",
            Self::French => "French",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for CuisineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dietary accommodations a guest can ask for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietaryRequest {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub nut_free: bool,
    pub low_sodium: bool,
    pub low_sugar: bool,
}

impl DietaryRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-course reaction to a dietary request.
pub trait DietaryAdjust {
    /// Reshape the course and its ingredient requirements for `request`.
    fn accommodate(&mut self, request: &DietaryRequest, ingredients: &mut Vec<Ingredient>);
}

/// Whether any word of `name` is one of `keywords`, singular or plural.
///
/// Words are compared whole, so "Eggplant" does not match "egg".
fn mentions_any(name: &str, keywords: &[&str]) -> bool {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .any(|word| {
            keywords.iter().any(|keyword| {
                word == *keyword
                    || word.strip_suffix('s') == Some(*keyword)
                    || word.strip_suffix("es") == Some(*keyword)
            })
        })
}

/// Drop every requirement whose name mentions one of `keywords`.
fn drop_matching(ingredients: &mut Vec<Ingredient>, keywords: &[&str]) {
    ingredients.retain(|ingredient| !mentions_any(&ingredient.name, keywords));
}

fn drop_for_diet(request: &DietaryRequest, ingredients: &mut Vec<Ingredient>) {
    if request.vegetarian || request.vegan {
        drop_matching(ingredients, MEAT_KEYWORDS);
    }
    if request.vegan {
        drop_matching(ingredients, ANIMAL_KEYWORDS);
    }
    if request.gluten_free {
        drop_matching(ingredients, GLUTEN_KEYWORDS);
    }
    if request.nut_free {
        drop_matching(ingredients, NUT_KEYWORDS);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingStyle {
    #[default]
    Plated,
    FamilyStyle,
    Buffet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appetizer {
    pub serving_style: ServingStyle,
    /// 0 (mild) to 10 (very spicy)
    pub spiciness_level: u8,
    pub vegetarian: bool,
}

impl DietaryAdjust for Appetizer {
    fn accommodate(&mut self, request: &DietaryRequest, ingredients: &mut Vec<Ingredient>) {
        drop_for_diet(request, ingredients);
        if request.vegetarian || request.vegan {
            self.vegetarian = true;
        }
        if request.low_sodium {
            self.spiciness_level /= 2;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingMethod {
    #[default]
    Grilled,
    Baked,
    Boiled,
    Fried,
    Raw,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainCourse {
    pub cooking_method: CookingMethod,
    pub protein_type: String,
    pub side_dishes: Vec<String>,
    pub gluten_free: bool,
}

impl DietaryAdjust for MainCourse {
    fn accommodate(&mut self, request: &DietaryRequest, ingredients: &mut Vec<Ingredient>) {
        drop_for_diet(request, ingredients);
        if request.vegetarian || request.vegan {
            self.protein_type = "Plant-based".to_string();
        }
        if request.gluten_free {
            self.side_dishes
                .retain(|side| !mentions_any(side, GLUTEN_KEYWORDS));
            self.gluten_free = true;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlavorProfile {
    #[default]
    Sweet,
    Bitter,
    Sour,
    Salty,
    Umami,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dessert {
    pub flavor_profile: FlavorProfile,
    /// 0 (not sweet) to 10 (very sweet)
    pub sweetness_level: u8,
    pub contains_nuts: bool,
}

impl DietaryAdjust for Dessert {
    fn accommodate(&mut self, request: &DietaryRequest, ingredients: &mut Vec<Ingredient>) {
        drop_for_diet(request, ingredients);
        if request.nut_free {
            self.contains_nuts = false;
        }
        if request.low_sugar {
            self.sweetness_level /= 2;
        }
    }
}

/// Course-specific data of a dish.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Course {
    Appetizer(Appetizer),
    MainCourse(MainCourse),
    Dessert(Dessert),
    /// No course-specific behavior; dietary requests only filter ingredients.
    #[default]
    Plain,
}

impl Course {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Appetizer(_) => "Appetizer",
            Self::MainCourse(_) => "Main Course",
            Self::Dessert(_) => "Dessert",
            Self::Plain => "Dish",
        }
    }
}

/// A dish order.
///
/// `ticket` identifies this particular order. Two dishes with the same name
/// are independent orders with different tickets; a clone is the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    #[serde(default = "Uuid::new_v4")]
    pub ticket: Uuid,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub cuisine: CuisineType,
    #[serde(default)]
    pub course: Course,
}

impl Dish {
    pub fn new(name: impl Into<String>, ingredients: Vec<Ingredient>) -> Self {
        Self {
            ticket: Uuid::new_v4(),
            name: name.into(),
            ingredients,
            prep_time_minutes: 0,
            price: 0.0,
            cuisine: CuisineType::default(),
            course: Course::default(),
        }
    }

    pub fn with_prep_time(mut self, minutes: u32) -> Self {
        self.prep_time_minutes = minutes;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_cuisine(mut self, cuisine: CuisineType) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.course = course;
        self
    }

    /// The same dish as a new, independent order.
    pub fn reissue(&self) -> Self {
        Self {
            ticket: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ingredients this dish needs, in the order they were listed.
    pub fn required_ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Adjust the dish for a dietary request.
    pub fn accommodate(&mut self, request: &DietaryRequest) {
        match &mut self.course {
            Course::Appetizer(course) => course.accommodate(request, &mut self.ingredients),
            Course::MainCourse(course) => course.accommodate(request, &mut self.ingredients),
            Course::Dessert(course) => course.accommodate(request, &mut self.ingredients),
            Course::Plain => drop_for_diet(request, &mut self.ingredients),
        }
    }

    /// Human-readable description of the dish.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "{}: {}\nCuisine: {}\nPreparation time: {} minutes\nPrice: ${:.2}\nIngredients:",
            self.course.label(),
            self.name,
            self.cuisine,
            self.prep_time_minutes,
            self.price
        );
        for ingredient in &self.ingredients {
            out.push_str(&format!("\n  - {} x{}", ingredient.name, ingredient.required_quantity));
        }

        match &self.course {
            Course::Appetizer(a) => {
                out.push_str(&format!(
                    "\nServing style: {:?}\nSpiciness level: {}\nVegetarian: {}",
                    a.serving_style,
                    a.spiciness_level,
                    if a.vegetarian { "Yes" } else { "No" }
                ));
            }
            Course::MainCourse(m) => {
                out.push_str(&format!(
                    "\nCooking method: {:?}\nProtein: {}\nSide dishes: {}\nGluten-free: {}",
                    m.cooking_method,
                    m.protein_type,
                    m.side_dishes.join(", "),
                    if m.gluten_free { "Yes" } else { "No" }
                ));
            }
            Course::Dessert(d) => {
                out.push_str(&format!(
                    "\nFlavor profile: {:?}\nSweetness level: {}\nContains nuts: {}",
                    d.flavor_profile,
                    d.sweetness_level,
                    if d.contains_nuts { "Yes" } else { "No" }
                ));
            }
            Course::Plain => {}
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dish: &Dish) -> Vec<&str> {
        dish.ingredients.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_vegetarian_main_course() {
        let mut dish = Dish::new(
            "Chicken Alfredo",
            vec![
                Ingredient::requirement("Chicken Breast", 1, 3.0),
                Ingredient::requirement("Fettuccine Pasta", 1, 1.0),
                Ingredient::requirement("Cream", 1, 0.5),
            ],
        )
        .with_course(Course::MainCourse(MainCourse {
            protein_type: "Chicken".to_string(),
            side_dishes: vec!["Garlic Bread".to_string(), "Salad".to_string()],
            ..Default::default()
        }));

        dish.accommodate(&DietaryRequest {
            vegetarian: true,
            gluten_free: true,
            ..Default::default()
        });

        assert_eq!(names(&dish), vec!["Cream"]);
        match &dish.course {
            Course::MainCourse(m) => {
                assert_eq!(m.protein_type, "Plant-based");
                assert_eq!(m.side_dishes, vec!["Salad".to_string()]);
                assert!(m.gluten_free);
            }
            other => panic!("unexpected course: {:?}", other),
        }
    }

    #[test]
    fn test_nut_free_low_sugar_dessert() {
        let mut dish = Dish::new(
            "Pecan Pie",
            vec![
                Ingredient::requirement("Pecans", 2, 1.0),
                Ingredient::requirement("Sugar", 1, 0.2),
            ],
        )
        .with_course(Course::Dessert(Dessert {
            sweetness_level: 8,
            contains_nuts: true,
            ..Default::default()
        }));

        dish.accommodate(&DietaryRequest {
            nut_free: true,
            low_sugar: true,
            ..Default::default()
        });

        assert_eq!(names(&dish), vec!["Sugar"]);
        assert_eq!(
            dish.course,
            Course::Dessert(Dessert {
                flavor_profile: FlavorProfile::Sweet,
                sweetness_level: 4,
                contains_nuts: false,
            })
        );
    }

    #[test]
    fn test_vegan_appetizer() {
        let mut dish = Dish::new(
            "Bruschetta",
            vec![
                Ingredient::requirement("Tomato", 2, 0.3),
                Ingredient::requirement("Mozzarella Cheese", 1, 1.2),
            ],
        )
        .with_course(Course::Appetizer(Appetizer {
            spiciness_level: 5,
            ..Default::default()
        }));

        dish.accommodate(&DietaryRequest {
            vegan: true,
            low_sodium: true,
            ..Default::default()
        });

        assert_eq!(names(&dish), vec!["Tomato"]);
        match &dish.course {
            Course::Appetizer(a) => {
                assert!(a.vegetarian);
                assert_eq!(a.spiciness_level, 2);
            }
            other => panic!("unexpected course: {:?}", other),
        }
    }

    #[test]
    fn test_keywords_match_whole_words() {
        let mut dish = Dish::new(
            "Ratatouille",
            vec![
                Ingredient::requirement("Eggplant", 1, 0.9),
                Ingredient::requirement("Champignon", 2, 0.4),
                Ingredient::requirement("Nutmeg", 1, 0.1),
                Ingredient::requirement("Coconut Milk", 1, 1.1),
                Ingredient::requirement("Zucchini", 1, 0.6),
            ],
        );

        dish.accommodate(&DietaryRequest {
            vegetarian: true,
            nut_free: true,
            ..Default::default()
        });
        assert_eq!(
            names(&dish),
            vec!["Eggplant", "Champignon", "Nutmeg", "Coconut Milk", "Zucchini"]
        );

        dish.accommodate(&DietaryRequest {
            vegan: true,
            ..Default::default()
        });
        assert_eq!(names(&dish), vec!["Eggplant", "Champignon", "Nutmeg", "Zucchini"]);
    }

    #[test]
    fn test_keywords_match_plurals() {
        let mut dish = Dish::new(
            "Brunch Plate",
            vec![
                Ingredient::requirement("Eggs", 2, 0.3),
                Ingredient::requirement("Mixed Nuts", 1, 1.0),
                Ingredient::requirement("Anchovies", 3, 0.2),
                Ingredient::requirement("Toast-Breadcrumbs", 1, 0.1),
                Ingredient::requirement("Spinach", 1, 0.4),
            ],
        );

        dish.accommodate(&DietaryRequest {
            vegan: true,
            nut_free: true,
            gluten_free: true,
            ..Default::default()
        });
        assert_eq!(names(&dish), vec!["Spinach"]);
    }

    #[test]
    fn test_empty_request_changes_nothing() {
        let mut dish = Dish::new("Steak", vec![Ingredient::requirement("Beef", 1, 5.0)]);
        let before = dish.clone();
        dish.accommodate(&DietaryRequest::default());
        assert_eq!(dish, before);
    }

    #[test]
    fn test_reissue_gets_new_ticket() {
        let dish = Dish::new("Soup", Vec::new());
        let again = dish.reissue();
        assert_eq!(again.name, dish.name);
        assert_ne!(again.ticket, dish.ticket);
        assert_eq!(dish.clone().ticket, dish.ticket);
    }

    #[test]
    fn test_describe() {
        let dish = Dish::new("Tiramisu", vec![Ingredient::requirement("Mascarpone", 1, 2.0)])
            .with_cuisine(CuisineType::Italian)
            .with_price(7.5)
            .with_course(Course::Dessert(Dessert::default()));

        let text = dish.describe();
        assert!(text.starts_with("Dessert: Tiramisu"));
        assert!(text.contains("Cuisine: Italian"));
        assert!(text.contains("Price: $7.50"));
        assert!(text.contains("  - Mascarpone x1"));
    }

    #[test]
    fn test_dish_from_yaml() {
        let yaml = r#"
name: Pad Thai
cuisine: other
ingredients:
  - name: Rice Noodles
    required_quantity: 1
course:
  kind: main_course
  cooking_method: fried
  protein_type: Tofu
"#;
        let dish: Dish = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(dish.name, "Pad Thai");
        assert_eq!(dish.ingredients[0].required_quantity, 1);
        assert!(matches!(
            dish.course,
            Course::MainCourse(MainCourse { cooking_method: CookingMethod::Fried, .. })
        ));
    }
}
