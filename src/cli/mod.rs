//! Terminal front end: one subcommand per view, rendered as plain text.

mod render;

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use time::Date;
use tracing::{debug, info, warn};

use crate::api::{parse_date, Category, CookbookApi, Difficulty, MealType, NutritionGoals};
use crate::assistant::ChatSession;
use crate::dashboard::DashboardStats;
use crate::error::ViewError;
use crate::meal_plans::MealSlot;
use crate::nutrition::NutritionForm;
use crate::recipes::{Filter, RecipeFilter, RecipeForm};
use crate::router::{ActiveView, Router, ViewId};
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "cookalgo")]
#[command(about = "Recipes, meal plans, nutrition tracking and a cooking assistant")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend origin, e.g. http://localhost:8001 (overrides BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recipe count, average cook time and today's calories
    Dashboard,
    /// Browse and add recipes
    #[command(subcommand)]
    Recipes(RecipeCommands),
    /// Show or fill the meal plan for a day
    #[command(subcommand)]
    Plan(PlanCommands),
    /// Track what was eaten on a day
    #[command(subcommand)]
    Nutrition(NutritionCommands),
    /// Talk to the cooking assistant; `/quit` exits
    Chat,
    /// Open a view by name
    Open {
        /// dashboard, recipes, meal-planning, nutrition or ai-assistant
        view: ViewId,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommands {
    /// List recipes, optionally filtered
    List {
        #[arg(long, default_value = "all")]
        category: Filter<Category>,
        #[arg(long, default_value = "all")]
        difficulty: Filter<Difficulty>,
    },
    /// Show one recipe in full
    Show { id: String },
    /// Add a recipe
    Add(AddRecipe),
}

#[derive(clap::Args, Debug)]
pub struct AddRecipe {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    /// File with one ingredient per line
    #[arg(long)]
    pub ingredients_file: PathBuf,
    /// File with one step per line
    #[arg(long)]
    pub instructions_file: PathBuf,
    /// Minutes
    #[arg(long)]
    pub prep_time: String,
    /// Minutes
    #[arg(long)]
    pub cook_time: String,
    #[arg(long)]
    pub servings: String,
    #[arg(long, default_value = "easy")]
    pub difficulty: Difficulty,
    #[arg(long, default_value = "breakfast")]
    pub category: Category,
    #[arg(long, default_value = "")]
    pub calories: String,
    #[arg(long, default_value = "")]
    pub protein: String,
    #[arg(long, default_value = "")]
    pub carbs: String,
    #[arg(long, default_value = "")]
    pub fats: String,
    #[arg(long, default_value = "")]
    pub image_url: String,
}

impl AddRecipe {
    fn into_form(self) -> anyhow::Result<RecipeForm> {
        Ok(RecipeForm {
            ingredients: read_text(&self.ingredients_file)?,
            instructions: read_text(&self.instructions_file)?,
            name: self.name,
            description: self.description,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            category: self.category,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            image_url: self.image_url,
        })
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    Show {
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Put a recipe in a slot; snacks accumulate, other slots are replaced
    Add {
        #[arg(long)]
        slot: MealSlot,
        #[arg(long)]
        recipe: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NutritionCommands {
    Show {
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Log servings of a recipe
    Log {
        #[arg(long)]
        meal_type: MealType,
        #[arg(long)]
        recipe: String,
        #[arg(long, default_value = "1")]
        servings: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Ask the assistant to review the day against goals
    Analyze {
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        protein: Option<f64>,
        #[arg(long)]
        carbs: Option<f64>,
        #[arg(long)]
        fats: Option<f64>,
    },
}

/// Bootstraps shared state, runs one command and prints whatever
/// notifications it raised.
pub async fn run(
    command: Commands,
    api: &dyn CookbookApi,
    today: Date,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut state = AppState::bootstrap(api, today).await;
    let mut router = Router::new(today);
    let result = dispatch(command, api, &mut state, &mut router, input, out).await;
    render::notices(out, &state.notices.drain())?;
    out.flush()?;
    result
}

async fn dispatch(
    command: Commands,
    api: &dyn CookbookApi,
    state: &mut AppState,
    router: &mut Router,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard => {
            render::dashboard(out, &DashboardStats::from_state(state))?;
        }
        Commands::Open { view } => {
            router.navigate(view);
            router.load_active(api).await;
            show(router, api, state, input, out).await?;
        }
        Commands::Chat => {
            router.navigate(ViewId::AiAssistant);
            show(router, api, state, input, out).await?;
        }
        Commands::Recipes(cmd) => recipes(cmd, api, state, router, out).await?,
        Commands::Plan(cmd) => plan(cmd, api, state, router, out).await?,
        Commands::Nutrition(cmd) => nutrition(cmd, api, state, router, out).await?,
    }
    Ok(())
}

/// Renders whatever view is mounted.
async fn show(
    router: &mut Router,
    api: &dyn CookbookApi,
    state: &AppState,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match router.active_mut() {
        ActiveView::Dashboard => render::dashboard(out, &DashboardStats::from_state(state))?,
        ActiveView::Recipes(view) => render::recipe_list(out, &view.filter, &view.visible(state))?,
        ActiveView::MealPlanning(view) => render::meal_plan(out, view, state)?,
        ActiveView::Nutrition(view) => render::nutrition(out, view, state)?,
        ActiveView::AiAssistant(chat) => converse(chat, api, input, out).await?,
    }
    Ok(())
}

async fn recipes(
    cmd: RecipeCommands,
    api: &dyn CookbookApi,
    state: &mut AppState,
    router: &mut Router,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    router.navigate(ViewId::Recipes);
    let ActiveView::Recipes(view) = router.active_mut() else {
        bail!("recipes view is not mounted");
    };
    match cmd {
        RecipeCommands::List {
            category,
            difficulty,
        } => {
            view.filter = RecipeFilter {
                category,
                difficulty,
            };
            render::recipe_list(out, &view.filter, &view.visible(state))?;
        }
        RecipeCommands::Show { id } => {
            let recipe = api
                .get_recipe(&id)
                .await
                .with_context(|| format!("loading recipe {id}"))?;
            render::recipe_detail(out, &recipe)?;
        }
        RecipeCommands::Add(args) => {
            view.open_dialog();
            view.draft = args.into_form()?;
            view.submit(api, state).await?;
            if let Some(created) = state.recipes.last() {
                render::recipe_detail(out, created)?;
            }
        }
    }
    Ok(())
}

async fn plan(
    cmd: PlanCommands,
    api: &dyn CookbookApi,
    state: &mut AppState,
    router: &mut Router,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    router.navigate(ViewId::MealPlanning);
    let ActiveView::MealPlanning(view) = router.active_mut() else {
        bail!("meal planning view is not mounted");
    };
    match cmd {
        PlanCommands::Show { date } => {
            let date = date.unwrap_or_else(|| view.selected_date());
            view.select_date(api, date).await;
        }
        PlanCommands::Add { slot, recipe, date } => {
            let date = date.unwrap_or_else(|| view.selected_date());
            view.select_date(api, date).await;
            if state.recipe(&recipe).is_none() {
                debug!(%recipe, "planning a recipe that is not in the local list");
            }
            view.dialog_open = true;
            view.chosen_slot = slot;
            view.chosen_recipe = Some(recipe);
            view.add_meal(api, state).await?;
        }
    }
    render::meal_plan(out, view, state)?;
    Ok(())
}

async fn nutrition(
    cmd: NutritionCommands,
    api: &dyn CookbookApi,
    state: &mut AppState,
    router: &mut Router,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    router.navigate(ViewId::Nutrition);
    let ActiveView::Nutrition(view) = router.active_mut() else {
        bail!("nutrition view is not mounted");
    };
    match cmd {
        NutritionCommands::Show { date } => {
            let date = date.unwrap_or_else(|| view.selected_date());
            view.select_date(api, date).await;
            render::nutrition(out, view, state)?;
        }
        NutritionCommands::Log {
            meal_type,
            recipe,
            servings,
            date,
        } => {
            let date = date.unwrap_or_else(|| view.selected_date());
            view.select_date(api, date).await;
            view.dialog_open = true;
            view.form = NutritionForm {
                meal_type,
                recipe_id: Some(recipe),
                servings,
            };
            view.log_entry(api, state).await?;
            render::nutrition(out, view, state)?;
        }
        NutritionCommands::Analyze {
            date,
            calories,
            protein,
            carbs,
            fats,
        } => {
            let date = date.unwrap_or_else(|| view.selected_date());
            view.select_date(api, date).await;
            render::nutrition(out, view, state)?;
            let goals = NutritionGoals {
                calories,
                protein,
                carbs,
                fats,
            };
            let analysis = view.analyze(api, goals).await;
            writeln!(out, "\n{analysis}")?;
        }
    }
    Ok(())
}

/// Line-oriented chat until `/quit` or end of input. `/history` prints what
/// the backend stored for this session.
async fn converse(
    chat: &mut ChatSession,
    api: &dyn CookbookApi,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    for turn in chat.transcript() {
        render::turn(out, turn)?;
    }
    let mut line = String::new();
    loop {
        write!(out, "you> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim_end_matches(['\r', '\n']);
        match text.trim() {
            "/quit" => break,
            "/history" => {
                match api.chat_history(chat.session_id()).await {
                    Ok(history) => writeln!(
                        out,
                        "{} exchanges stored for {}",
                        history.len(),
                        chat.session_id()
                    )?,
                    Err(e) => {
                        warn!(error = %e, "loading chat history failed");
                        writeln!(out, "history unavailable")?;
                    }
                }
                continue;
            }
            _ => {}
        }
        match chat.send(api, text).await {
            Ok(turn) => render::turn(out, turn)?,
            Err(ViewError::EmptyMessage) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    info!(turns = chat.transcript().len(), "chat closed");
    Ok(())
}
