//! User-facing message catalogue.
//!
//! Error messages produced by the repositories are localized at the point
//! they are raised, so the views can print them verbatim.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fr" | "fr-fr" | "french" => Some(Self::Fr),
            "en" | "en-us" | "en-gb" | "english" => Some(Self::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    FetchArticlesFailed,
    FetchArticleFailed,
    ArticleNotFound,
    CreateArticleFailed,
    DeleteArticleFailed,
    InvalidCredentials,
    LoginFailed,
    InvalidRegistration,
    RegisterFailed,
    FetchUsersFailed,
    DeleteUserFailed,
    Unauthorized,
    SessionExpired,
    AdminRequired,
    LoginRequired,
    NetworkUnavailable,
    LoggedIn,
    Registered,
    LoggedOut,
    ArticlePublished,
    ArticleDeleted,
    UserDeleted,
    NoArticles,
    NoUsers,
    FeedLoadFailed,
    FeedEnd,
    FeedMore,
    // Labels
    NavHome,
    NavArticles,
    NavAdmin,
    NavLogin,
    NavRegister,
    NavLogout,
    HeroTitle,
    HeroSubtitle,
    FeaturesTitle,
    FeatureSimple,
    FeatureCommunity,
    FeatureFast,
    RecentArticles,
    RecentArticlesSubtitle,
    SeeAllArticles,
    CtaTitle,
    CtaSubtitle,
    FooterTagline,
    LoginTitle,
    RegisterTitle,
    RegisterSubtitle,
    FieldEmail,
    FieldPassword,
    FieldUsername,
    FieldFirstName,
    FieldLastName,
    FieldTitle,
    FieldImageUrl,
    FieldContent,
    FieldStatus,
    AdminTitle,
    AdminSubtitle,
    StatArticles,
    StatUsers,
    AdminArticlesTitle,
    AdminUsersTitle,
    RoleAdmin,
    RoleUser,
    Anonymous,
    Cancelled,
    NothingToLoad,
    UnknownPage,
}

pub fn tr(locale: Locale, msg: Msg) -> &'static str {
    match locale {
        Locale::Fr => fr(msg),
        Locale::En => en(msg),
    }
}

fn fr(msg: Msg) -> &'static str {
    match msg {
        Msg::FetchArticlesFailed => "Impossible de récupérer les articles",
        Msg::FetchArticleFailed => "Impossible de récupérer l'article",
        Msg::ArticleNotFound => "Article introuvable",
        Msg::CreateArticleFailed => "Impossible de créer l'article",
        Msg::DeleteArticleFailed => "Impossible de supprimer l'article",
        Msg::InvalidCredentials => "Email ou mot de passe incorrect",
        Msg::LoginFailed => "Une erreur est survenue lors de la connexion",
        Msg::InvalidRegistration => {
            "Données d'inscription invalides ou utilisateur déjà existant"
        }
        Msg::RegisterFailed => "Une erreur est survenue lors de l'inscription",
        Msg::FetchUsersFailed => "Impossible de récupérer les utilisateurs",
        Msg::DeleteUserFailed => "Impossible de supprimer l'utilisateur",
        Msg::Unauthorized => "Accès refusé par le serveur",
        Msg::SessionExpired => "Votre session a expiré, veuillez vous reconnecter",
        Msg::AdminRequired => "Accès réservé aux administrateurs",
        Msg::LoginRequired => "Veuillez vous connecter",
        Msg::NetworkUnavailable => "Le serveur est injoignable",
        Msg::LoggedIn => "Connexion réussie",
        Msg::Registered => "Compte créé avec succès",
        Msg::LoggedOut => "Vous êtes déconnecté",
        Msg::ArticlePublished => "Article publié",
        Msg::ArticleDeleted => "Article supprimé",
        Msg::UserDeleted => "Utilisateur supprimé",
        Msg::NoArticles => "Aucun article pour le moment",
        Msg::NoUsers => "Aucun utilisateur",
        Msg::FeedLoadFailed => {
            "Une erreur est survenue lors de la récupération des articles."
        }
        Msg::FeedEnd => "Vous avez tout lu !",
        Msg::FeedMore => "Tapez /more pour charger la suite",
        Msg::NavHome => "Accueil",
        Msg::NavArticles => "Articles",
        Msg::NavAdmin => "Admin",
        Msg::NavLogin => "Connexion",
        Msg::NavRegister => "S'inscrire",
        Msg::NavLogout => "Déconnexion",
        Msg::HeroTitle => "Partagez vos idées avec le monde",
        Msg::HeroSubtitle => {
            "ModernBlog est une plateforme simple pour écrire, publier et découvrir des articles sur les sujets qui vous passionnent."
        }
        Msg::FeaturesTitle => "Pourquoi ModernBlog ?",
        Msg::FeatureSimple => {
            "Simple à utiliser : un éditeur intuitif pour rédiger vos articles facilement."
        }
        Msg::FeatureCommunity => "Communauté active : connectez-vous avec des lecteurs passionnés.",
        Msg::FeatureFast => {
            "Rapide et fiable : une plateforme performante pour une expérience fluide."
        }
        Msg::RecentArticles => "Articles récents",
        Msg::RecentArticlesSubtitle => "Découvrez nos dernières publications",
        Msg::SeeAllArticles => "Voir tous les articles",
        Msg::CtaTitle => "Prêt à commencer ?",
        Msg::CtaSubtitle => "Rejoignez notre communauté et partagez vos idées.",
        Msg::FooterTagline => "Une plateforme moderne pour partager vos idées avec le monde.",
        Msg::LoginTitle => "Connexion",
        Msg::RegisterTitle => "Rejoignez l'aventure",
        Msg::RegisterSubtitle => "Créez votre compte ModernBlog en quelques secondes",
        Msg::FieldEmail => "Adresse email",
        Msg::FieldPassword => "Mot de passe",
        Msg::FieldUsername => "Nom d'utilisateur",
        Msg::FieldFirstName => "Prénom",
        Msg::FieldLastName => "Nom",
        Msg::FieldTitle => "Titre de l'article",
        Msg::FieldImageUrl => "URL de l'image (optionnel)",
        Msg::FieldContent => "Contenu (terminez par une ligne contenant un seul '.')",
        Msg::FieldStatus => "Statut (draft/published, vide = brouillon)",
        Msg::AdminTitle => "Espace Administrateur",
        Msg::AdminSubtitle => "Gérez vos articles et suivez vos performances.",
        Msg::StatArticles => "Total Articles",
        Msg::StatUsers => "Utilisateurs",
        Msg::AdminArticlesTitle => "Gestion des articles",
        Msg::AdminUsersTitle => "Gestion des utilisateurs",
        Msg::RoleAdmin => "Admin",
        Msg::RoleUser => "Utilisateur",
        Msg::Anonymous => "Visiteur anonyme",
        Msg::Cancelled => "Annulé",
        Msg::NothingToLoad => "Rien à charger sur cette page",
        Msg::UnknownPage => "Page introuvable",
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::FetchArticlesFailed => "Failed to fetch articles",
        Msg::FetchArticleFailed => "Failed to fetch article",
        Msg::ArticleNotFound => "Article not found",
        Msg::CreateArticleFailed => "Failed to create article",
        Msg::DeleteArticleFailed => "Failed to delete article",
        Msg::InvalidCredentials => "Invalid email or password",
        Msg::LoginFailed => "Something went wrong while logging in",
        Msg::InvalidRegistration => "Invalid registration data or user already exists",
        Msg::RegisterFailed => "Something went wrong while registering",
        Msg::FetchUsersFailed => "Failed to fetch users",
        Msg::DeleteUserFailed => "Failed to delete user",
        Msg::Unauthorized => "Access denied by the server",
        Msg::SessionExpired => "Your session has expired, please log in again",
        Msg::AdminRequired => "Administrators only",
        Msg::LoginRequired => "Please log in",
        Msg::NetworkUnavailable => "The server is unreachable",
        Msg::LoggedIn => "Logged in",
        Msg::Registered => "Account created",
        Msg::LoggedOut => "You are logged out",
        Msg::ArticlePublished => "Article published",
        Msg::ArticleDeleted => "Article deleted",
        Msg::UserDeleted => "User deleted",
        Msg::NoArticles => "No articles yet",
        Msg::NoUsers => "No users",
        Msg::FeedLoadFailed => "Something went wrong while loading articles.",
        Msg::FeedEnd => "You're all caught up!",
        Msg::FeedMore => "Type /more to load the next page",
        Msg::NavHome => "Home",
        Msg::NavArticles => "Articles",
        Msg::NavAdmin => "Admin",
        Msg::NavLogin => "Log in",
        Msg::NavRegister => "Sign up",
        Msg::NavLogout => "Log out",
        Msg::HeroTitle => "Share your ideas with the world",
        Msg::HeroSubtitle => {
            "ModernBlog is a simple platform to write, publish and discover articles about the topics you love."
        }
        Msg::FeaturesTitle => "Why ModernBlog?",
        Msg::FeatureSimple => "Easy to use: an intuitive editor to write your articles.",
        Msg::FeatureCommunity => "Active community: connect with passionate readers.",
        Msg::FeatureFast => "Fast and reliable: a smooth experience.",
        Msg::RecentArticles => "Recent articles",
        Msg::RecentArticlesSubtitle => "Discover our latest posts",
        Msg::SeeAllArticles => "See all articles",
        Msg::CtaTitle => "Ready to start?",
        Msg::CtaSubtitle => "Join our community and share your ideas.",
        Msg::FooterTagline => "A modern platform to share your ideas with the world.",
        Msg::LoginTitle => "Log in",
        Msg::RegisterTitle => "Join the adventure",
        Msg::RegisterSubtitle => "Create your ModernBlog account in seconds",
        Msg::FieldEmail => "Email address",
        Msg::FieldPassword => "Password",
        Msg::FieldUsername => "Username",
        Msg::FieldFirstName => "First name",
        Msg::FieldLastName => "Last name",
        Msg::FieldTitle => "Article title",
        Msg::FieldImageUrl => "Image URL (optional)",
        Msg::FieldContent => "Content (finish with a line containing a single '.')",
        Msg::FieldStatus => "Status (draft/published, empty = draft)",
        Msg::AdminTitle => "Admin area",
        Msg::AdminSubtitle => "Manage your articles and follow your numbers.",
        Msg::StatArticles => "Total articles",
        Msg::StatUsers => "Users",
        Msg::AdminArticlesTitle => "Articles",
        Msg::AdminUsersTitle => "Users",
        Msg::RoleAdmin => "Admin",
        Msg::RoleUser => "User",
        Msg::Anonymous => "Anonymous visitor",
        Msg::Cancelled => "Cancelled",
        Msg::NothingToLoad => "Nothing to load on this page",
        Msg::UnknownPage => "Page not found",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!(Locale::from_str("FR"), Some(Locale::Fr));
        assert_eq!(Locale::from_str("en-us"), Some(Locale::En));
        assert_eq!(Locale::from_str("de"), None);
    }

    #[test]
    fn test_invalid_credentials_messages() {
        assert_eq!(
            tr(Locale::Fr, Msg::InvalidCredentials),
            "Email ou mot de passe incorrect"
        );
        assert_eq!(
            tr(Locale::En, Msg::InvalidCredentials),
            "Invalid email or password"
        );
    }
}
