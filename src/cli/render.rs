use std::io::{self, Write};

use crate::api::Recipe;
use crate::assistant::{Role, Turn};
use crate::dashboard::DashboardStats;
use crate::meal_plans::{MealPlanningView, MealSlot, Planned};
use crate::notify::Notice;
use crate::nutrition::NutritionView;
use crate::recipes::RecipeFilter;
use crate::state::AppState;

pub fn dashboard(out: &mut dyn Write, stats: &DashboardStats) -> io::Result<()> {
    writeln!(out, "CookAlgo")?;
    writeln!(out, "  recipes:          {}", stats.total_recipes)?;
    writeln!(out, "  avg cook time:    {} min", stats.avg_cook_time)?;
    writeln!(out, "  today's calories: {}", stats.today_calories.round())?;
    Ok(())
}

pub fn recipe_list(out: &mut dyn Write, filter: &RecipeFilter, recipes: &[&Recipe]) -> io::Result<()> {
    writeln!(
        out,
        "Recipes (category: {}, difficulty: {})",
        filter.category, filter.difficulty
    )?;
    if recipes.is_empty() {
        writeln!(out, "  no recipes found")?;
        return Ok(());
    }
    for r in recipes {
        writeln!(
            out,
            "  {:<36}  {:<28}  {:<9}  {:<6}  {:>3}+{:<3} min  {} servings  {} kcal",
            r.id,
            r.name,
            r.category,
            r.difficulty,
            r.prep_time,
            r.cook_time,
            r.servings,
            r.nutrition.calories.round()
        )?;
    }
    Ok(())
}

pub fn recipe_detail(out: &mut dyn Write, r: &Recipe) -> io::Result<()> {
    writeln!(out, "{} [{}]", r.name, r.id)?;
    writeln!(out, "{}", r.description)?;
    writeln!(
        out,
        "{} / {} / prep {} min / cook {} min / serves {}",
        r.category, r.difficulty, r.prep_time, r.cook_time, r.servings
    )?;
    writeln!(
        out,
        "per serving: {} kcal, P {}g, C {}g, F {}g",
        r.nutrition.calories, r.nutrition.protein, r.nutrition.carbs, r.nutrition.fats
    )?;
    if let Some(url) = &r.image_url {
        writeln!(out, "image: {url}")?;
    }
    writeln!(out, "\nIngredients:")?;
    for ingredient in &r.ingredients {
        writeln!(out, "  - {ingredient}")?;
    }
    writeln!(out, "\nInstructions:")?;
    for (i, step) in r.instructions.iter().enumerate() {
        writeln!(out, "  {}. {step}", i + 1)?;
    }
    Ok(())
}

fn planned(out: &mut dyn Write, label: &str, entry: Planned<'_>) -> io::Result<()> {
    match entry {
        Planned::Recipe(r) => writeln!(
            out,
            "  {label:<10} {} ({} min, {} kcal)",
            r.name,
            r.prep_time + r.cook_time,
            r.nutrition.calories.round()
        ),
        Planned::Empty => writeln!(out, "  {label:<10} no {label} planned"),
    }
}

pub fn meal_plan(out: &mut dyn Write, view: &MealPlanningView, state: &AppState) -> io::Result<()> {
    writeln!(out, "Meal plan for {}", view.selected_date())?;
    for slot in [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner] {
        for entry in view.slot(slot, state) {
            planned(out, slot.as_str(), entry)?;
        }
    }
    let snacks = view.slot(MealSlot::Snacks, state);
    if !snacks.is_empty() {
        writeln!(out, "  snacks:")?;
        for entry in snacks {
            planned(out, "  snack", entry)?;
        }
    }
    Ok(())
}

pub fn nutrition(out: &mut dyn Write, view: &NutritionView, state: &AppState) -> io::Result<()> {
    let log = view.log();
    writeln!(out, "Nutrition for {}", log.date)?;
    writeln!(
        out,
        "  totals: {} kcal | protein {}g | carbs {}g | fats {}g",
        log.totals.calories.round(),
        log.totals.protein.round(),
        log.totals.carbs.round(),
        log.totals.fats.round()
    )?;
    let entries = view.entries(state);
    if entries.is_empty() {
        writeln!(out, "  nothing logged yet")?;
        return Ok(());
    }
    for (entry, recipe) in entries {
        writeln!(
            out,
            "  {:<9} {} x{} servings: {} kcal (P {}g | C {}g | F {}g)",
            entry.meal_type,
            recipe.map_or("Unknown Recipe", |r| r.name.as_str()),
            entry.servings,
            entry.calories.round(),
            entry.protein.round(),
            entry.carbs.round(),
            entry.fats.round()
        )?;
    }
    Ok(())
}

pub fn turn(out: &mut dyn Write, turn: &Turn) -> io::Result<()> {
    let who = match turn.role {
        Role::User => "you",
        Role::Assistant => "chef",
    };
    writeln!(out, "{who}> {}", turn.content)
}

pub fn notices(out: &mut dyn Write, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}
