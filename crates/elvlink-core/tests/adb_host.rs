use elvlink_core::error::LaunchError;
use elvlink_core::link::WALLET_PACKAGE;
use elvlink_core::platform::adb::{classify_am_start, is_pm_path_hit};
use elvlink_core::platform::{AdbHost, PackageQuery, UrlLauncher};

#[test]
fn pm_path_args_target_serial() {
    let host = AdbHost::new("adb").with_serial("emulator-5554");

    assert_eq!(
        host.pm_path_args(WALLET_PACKAGE),
        vec!["-s", "emulator-5554", "shell", "pm", "path", "'app.eluvio.wallet'"]
    );
}

#[test]
fn am_start_args_quote_url_and_pin_package() {
    let host = AdbHost::new("adb");
    let url = "elvwallet://items/m/ictr/s?x=1&jwt=abc";

    assert_eq!(
        host.am_start_args(url, Some(WALLET_PACKAGE)),
        vec![
            "shell",
            "am",
            "start",
            "-W",
            "-a",
            "android.intent.action.VIEW",
            "-d",
            "'elvwallet://items/m/ictr/s?x=1&jwt=abc'",
            "-p",
            "'app.eluvio.wallet'",
        ]
    );
    assert!(!host.am_start_args(url, None).contains(&"-p".to_string()));
}

#[test]
fn pm_path_output() {
    assert!(is_pm_path_hit("package:/data/app/~~x==/app.eluvio.wallet-1/base.apk\n"));
    assert!(!is_pm_path_hit(""));
    assert!(!is_pm_path_hit("Error: no such package\n"));
}

#[test]
fn am_start_success() {
    let stdout = "Starting: Intent { act=android.intent.action.VIEW dat=elvwallet://items/... pkg=app.eluvio.wallet }\nStatus: ok\nLaunchState: COLD\n";
    assert!(classify_am_start("elvwallet://x", Some(WALLET_PACKAGE), true, stdout, "").is_ok());
}

#[test]
fn am_start_unresolved_intent_is_no_handler_even_on_zero_exit() {
    let stdout = "Starting: Intent { ... }\nError: Activity not started, unable to resolve Intent { act=android.intent.action.VIEW }\n";

    let err = classify_am_start("elvwallet://x", Some(WALLET_PACKAGE), true, stdout, "").unwrap_err();

    assert!(matches!(
        err,
        LaunchError::NoHandler { ref url, ref package }
            if url == "elvwallet://x" && package.as_deref() == Some(WALLET_PACKAGE)
    ));
}

#[test]
fn am_start_other_errors_are_rejections() {
    let err = classify_am_start(
        "market://details?id=x",
        None,
        true,
        "Exception occurred while executing 'start':\njava.lang.SecurityException: Permission Denial\n",
        "",
    )
    .unwrap_err();
    assert!(matches!(err, LaunchError::Rejected { ref message, .. } if message.starts_with("Exception")));

    let err = classify_am_start("market://details?id=x", None, false, "", "error: no devices/emulators found\n")
        .unwrap_err();
    assert!(matches!(
        err,
        LaunchError::Rejected { ref message, .. } if message == "error: no devices/emulators found"
    ));
}

#[test]
fn missing_adb_binary() {
    let host = AdbHost::new("/nonexistent/elvlink-test/adb");

    // query failures collapse to "not installed"
    assert!(!host.is_app_installed(WALLET_PACKAGE));
    // launch failures surface
    assert!(matches!(
        host.launch_url("elvwallet://items/m/ictr/s", None),
        Err(LaunchError::Io(_))
    ));
}
