/// The page that slack redirects to once this app is installed into a workspace.
pub const INSTALL_SUCCESS_PAGE: &str = r#"<!DOCTYPE html>
<html>

<head>
  <meta charset="utf-8">
  <title>Dajsz</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <style type="text/css">
    body {
      display: grid;
      grid-template-columns: 100%;
      grid-template-rows: 100%;
      width: 100vw;
      height: 100vh;
      margin: 0;
    }

    div.content {
      grid-column: 1;
      grid-row: 1;
      justify-self: center;
      align-self: center;
    }

    div.success {
      background-color: rgba(58, 186, 41, .2);
      padding: .5em 2em;
      border-radius: .5em;
      border: 2px solid rgba(58, 186, 41, .3);
      box-shadow: 0 0 1em rgba(0, 0, 0, 0.1);
      color: rgba(0, 0, 0, .8);
      margin: 5em;
    }
  </style>
</head>

<body>
  <div class="content success">
    <p>
      Dajsz was successfully installed to your workspace, so go over there and play! You can close
      this window now.
    </p>
  </div>
</body>
</html>
"#;
